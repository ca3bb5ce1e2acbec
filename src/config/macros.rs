/// Configuration macros for zero-repetition config definitions
///
/// `config_struct!` declares a struct whose fields carry their default values
/// inline. It generates public fields, a `Default` impl and serde support with
/// `#[serde(default)]`, so a partial TOML file fills missing keys from defaults.
///
/// # Example
/// ```ignore
/// config_struct! {
///     pub struct RpcConfig {
///         url: String = "https://api.mainnet-beta.solana.com".to_string(),
///         timeout_secs: u64 = 20,
///     }
/// }
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
