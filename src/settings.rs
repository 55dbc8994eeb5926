use serde::{Deserialize, Serialize};

const SETTINGS_KEY: &str = "settings";

/// Base URL baked in at build time; empty means same origin as the page.
pub const DEFAULT_API_BASE_URL: &str = match option_env!("FINANCEIRO_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

pub const CURRENCIES: [(&str, &str); 3] = [("BRL", "R$"), ("USD", "$"), ("EUR", "€")];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub api_base_url: String,
    pub currency_code: String,
    pub currency_symbol: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            currency_code: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
        }
    }
}

impl AppSettings {
    /// Joins an absolute API path onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub fn with_currency(&self, code: &str) -> Self {
        AppSettings {
            currency_code: code.to_string(),
            currency_symbol: currency_symbol_for(code).to_string(),
            ..self.clone()
        }
    }

    pub fn with_base_url(&self, url: &str) -> Self {
        AppSettings {
            api_base_url: url.trim().to_string(),
            ..self.clone()
        }
    }
}

pub fn currency_symbol_for(code: &str) -> &'static str {
    CURRENCIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, symbol)| *symbol)
        .unwrap_or("R$")
}

pub fn load_settings() -> AppSettings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(SETTINGS_KEY) {
                match serde_json::from_str::<AppSettings>(&raw) {
                    Ok(settings) => return settings,
                    Err(e) => log::warn!("ignoring stored settings: {}", e),
                }
            }
        }
    }
    AppSettings::default()
}

pub fn save_settings(settings: &AppSettings) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(raw) = serde_json::to_string(settings) {
                if storage.set_item(SETTINGS_KEY, &raw).is_err() {
                    log::warn!("could not persist settings");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let settings = AppSettings::default().with_base_url("http://localhost:5000/");
        assert_eq!(
            settings.url("/api/lancamentos"),
            "http://localhost:5000/api/lancamentos"
        );
        let same_origin = AppSettings::default().with_base_url("");
        assert_eq!(same_origin.url("/api/vencimentos"), "/api/vencimentos");
    }

    #[test]
    fn currency_change_updates_symbol() {
        let settings = AppSettings::default().with_currency("EUR");
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(currency_symbol_for("XYZ"), "R$");
    }

    #[test]
    fn stored_settings_without_base_url_still_decode() {
        let raw = r#"{"currency_code":"USD","currency_symbol":"$"}"#;
        let settings: AppSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.api_base_url, "");
        assert_eq!(settings.currency_code, "USD");
    }
}
