use core_logic::{gwei_to_wei, GasConfig, GasConfigToml, StandardGasLimits};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        let limits = StandardGasLimits::default();
        assert_eq!(limits.deploy, 6_000_000);
        assert_eq!(limits.native_seed, 1_000_000);
        assert_eq!(limits.mint_position, 1_000_000);
    }

    #[test]
    fn test_toml_overrides_some_fields() {
        let raw: GasConfigToml = toml::from_str(
            r#"
            max_gwei = 40.0
            limit_mint_position = 1200000
            "#,
        )
        .unwrap();
        let config = GasConfig::from(raw);

        assert_eq!(config.max_fee_wei(), 40_000_000_000);
        assert_eq!(config.limit_mint_position(), 1_200_000);
        // untouched fields keep their defaults
        assert_eq!(config.priority_fee_wei(), 1_500_000_000);
        assert_eq!(config.limit_deploy(), 6_000_000);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let raw: GasConfigToml = toml::from_str("").unwrap();
        let config = GasConfig::from(raw);
        let defaults = GasConfig::default();

        assert_eq!(config.max_gwei, defaults.max_gwei);
        assert_eq!(config.limits, defaults.limits);
    }

    #[test]
    fn test_fractional_priority_fee() {
        let config = GasConfig::new().with_priority_fee(0.1);
        assert_eq!(config.priority_fee_wei(), 100_000_000);
        assert_eq!(gwei_to_wei(2.5), 2_500_000_000);
    }
}
