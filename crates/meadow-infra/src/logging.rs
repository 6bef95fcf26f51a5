// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Global logger initialization.

use std::sync::Once;

/// Modules whose chatter is capped at `warn` unless a filter names them.
const NOISY_MODULES: &[&str] = &["glow"];

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "meadow_lanes=debug,meadow_infra=trace").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter. `RUST_LOG` is used when absent, then `info`.
    pub env_filter: Option<String>,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger.
///
/// Idempotent: only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = match &config.env_filter {
            Some(filter) => {
                let mut builder = env_logger::Builder::new();
                builder.parse_filters(filter);
                builder
            }
            None => env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("info"),
            ),
        };
        for module in NOISY_MODULES {
            builder.filter_module(module, log::LevelFilter::Warn);
        }
        builder.write_style(config.write_style);

        if builder.try_init().is_err() {
            // Another logger was installed by the host application.
            return;
        }
        log::debug!("Logging initialized.");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".to_string()),
            ..Default::default()
        });
        init_logging(LoggingConfig::default());
        log::info!("still logging");
    }
}
