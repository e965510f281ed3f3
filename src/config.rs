//! Configuration module for loading and parsing TOML configuration files.
//!
//! Every tradable product, its position limit, and its quoting strategy are
//! declared here as data. Adding a product or re-weighting a basket is a
//! config change, never a core-code change.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// List of configured products.
    pub products: Vec<ProductConfig>,
}

/// One tradable product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductConfig {
    /// Product symbol (e.g., "QUARTZ").
    pub symbol: String,
    /// Maximum absolute signed position the agent may hold.
    pub position_limit: i64,
    /// Quoting strategy; products without one are tracked for risk but
    /// never quoted (basket constituents, for instance).
    #[serde(default)]
    pub strategy: Option<StrategyConfig>,
}

/// Quoting strategy for a product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Quote around a constant fair price.
    Fixed {
        /// The configured fair price.
        fair_price: i64,
        /// Make-quote offset from fair.
        tolerance: i64,
    },
    /// Quote around a smoothed estimate built from the carried mid-price
    /// history. Needs at least one tick of history, so it sits out tick 0.
    Smoothed {
        /// Make-quote offset from fair.
        tolerance: i64,
    },
    /// Quote around a weighted combination of other products' mid prices.
    Basket {
        /// Constituent products and their weights.
        legs: Vec<BasketLeg>,
        /// Constant added to the weighted sum.
        offset: f64,
        /// Make-quote offset from fair.
        tolerance: i64,
    },
}

impl StrategyConfig {
    /// Make-quote offset from fair, whatever the strategy.
    #[must_use]
    pub fn tolerance(&self) -> i64 {
        match self {
            Self::Fixed { tolerance, .. }
            | Self::Smoothed { tolerance }
            | Self::Basket { tolerance, .. } => *tolerance,
        }
    }

    /// Whether the strategy can only run once at least one tick of history
    /// exists. Only fixed-price products quote at tick 0.
    #[must_use]
    pub fn requires_history(&self) -> bool {
        !matches!(self, Self::Fixed { .. })
    }
}

/// One constituent of a basket product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasketLeg {
    /// Constituent symbol.
    pub symbol: String,
    /// Weight applied to the constituent's mid price.
    pub weight: f64,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Arguments
    /// * `content` - TOML content as string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Position limit for a symbol, `None` when the product is not
    /// configured.
    #[must_use]
    pub fn position_limit(&self, symbol: &str) -> Option<i64> {
        self.products
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.position_limit)
    }

    /// Products the agent actively quotes, in declaration order.
    pub fn quoted_products(&self) -> impl Iterator<Item = &ProductConfig> {
        self.products.iter().filter(|p| p.strategy.is_some())
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::InvalidValue(
                "at least one product must be configured".to_string(),
            ));
        }

        for (i, product) in self.products.iter().enumerate() {
            if product.symbol.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "product symbol cannot be empty".to_string(),
                ));
            }
            if self.products[..i].iter().any(|p| p.symbol == product.symbol) {
                return Err(ConfigError::InvalidValue(format!(
                    "duplicate product symbol: {}",
                    product.symbol
                )));
            }
            if product.position_limit <= 0 {
                return Err(ConfigError::InvalidValue(format!(
                    "product {} position_limit must be positive",
                    product.symbol
                )));
            }

            match &product.strategy {
                Some(StrategyConfig::Fixed { fair_price, tolerance }) => {
                    if *fair_price <= 0 {
                        return Err(ConfigError::InvalidValue(format!(
                            "product {} fair_price must be positive",
                            product.symbol
                        )));
                    }
                    Self::validate_tolerance(&product.symbol, *tolerance)?;
                }
                Some(StrategyConfig::Smoothed { tolerance }) => {
                    Self::validate_tolerance(&product.symbol, *tolerance)?;
                }
                Some(StrategyConfig::Basket {
                    legs, tolerance, ..
                }) => {
                    Self::validate_tolerance(&product.symbol, *tolerance)?;
                    if legs.is_empty() {
                        return Err(ConfigError::InvalidValue(format!(
                            "basket {} must have at least one leg",
                            product.symbol
                        )));
                    }
                    for leg in legs {
                        if leg.symbol == product.symbol {
                            return Err(ConfigError::InvalidValue(format!(
                                "basket {} cannot contain itself",
                                product.symbol
                            )));
                        }
                        if !self.products.iter().any(|p| p.symbol == leg.symbol) {
                            return Err(ConfigError::InvalidValue(format!(
                                "basket {} references unconfigured product {}",
                                product.symbol, leg.symbol
                            )));
                        }
                    }
                }
                None => {}
            }
        }

        Ok(())
    }

    fn validate_tolerance(symbol: &str, tolerance: i64) -> Result<(), ConfigError> {
        if tolerance <= 0 {
            return Err(ConfigError::InvalidValue(format!(
                "product {} tolerance must be positive",
                symbol
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            products: vec![
                ProductConfig {
                    symbol: "OBSIDIAN".to_string(),
                    position_limit: 20,
                    strategy: Some(StrategyConfig::Fixed {
                        fair_price: 10_000,
                        tolerance: 4,
                    }),
                },
                ProductConfig {
                    symbol: "QUARTZ".to_string(),
                    position_limit: 20,
                    strategy: Some(StrategyConfig::Smoothed { tolerance: 3 }),
                },
                ProductConfig {
                    symbol: "GEODE".to_string(),
                    position_limit: 60,
                    strategy: Some(StrategyConfig::Basket {
                        legs: vec![
                            BasketLeg {
                                symbol: "BASALT".to_string(),
                                weight: 4.0,
                            },
                            BasketLeg {
                                symbol: "FLINT".to_string(),
                                weight: 1.0,
                            },
                            BasketLeg {
                                symbol: "PUMICE".to_string(),
                                weight: 6.0,
                            },
                        ],
                        offset: 379.0,
                        tolerance: 6,
                    }),
                },
                ProductConfig {
                    symbol: "BASALT".to_string(),
                    position_limit: 250,
                    strategy: None,
                },
                ProductConfig {
                    symbol: "FLINT".to_string(),
                    position_limit: 60,
                    strategy: None,
                },
                ProductConfig {
                    symbol: "PUMICE".to_string(),
                    position_limit: 350,
                    strategy: None,
                },
            ],
        }
    }
}
