//! Clients for the two external lookup services: the Sintegra tax
//! registry and the ViaCEP postal-code service.
//!
//! Both take the base URL as a parameter so tests can point them at a
//! local stand-in server.

use crate::error::{AppError, AppResult};
use crate::types::{CepInfo, SintegraInfo};
use serde_json::Value;

/// Strips everything but ASCII digits from a tax ID or postal code.
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn first_string(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

fn first_value(payload: &Value, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .find_map(|key| payload.get(*key).filter(|v| !v.is_null()).cloned())
}

/// Resolves a normalized CNPJ against the tax registry and reshapes the
/// response, tolerating the registry's alternate key spellings.
pub async fn sintegra_lookup(
    http: &reqwest::Client,
    base_url: &str,
    token: &str,
    cnpj: &str,
) -> AppResult<SintegraInfo> {
    let url = format!("{base_url}/api/v1/execute-api.php?token={token}&cnpj={cnpj}&plugin=RF");
    let response = http.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(AppError::UpstreamGateway {
            message: "Sintegra service returned error".to_string(),
            status: response.status().as_u16(),
        });
    }

    let payload: Value = response.json().await?;
    Ok(SintegraInfo {
        logradouro: first_string(&payload, &["logradouro", "address"]),
        numero: first_string(&payload, &["numero", "number"]),
        complemento: first_string(&payload, &["complemento", "complement"]),
        bairro: first_string(&payload, &["bairro"]),
        municipio: first_string(&payload, &["municipio", "city", "localidade"]),
        uf: first_string(&payload, &["uf", "estado"]),
        atividade_principal: first_value(
            &payload,
            &["atividade_principal", "atividades_principais"],
        ),
    })
}

/// Resolves an 8-digit CEP against the address-lookup service.
pub async fn cep_lookup(
    http: &reqwest::Client,
    base_url: &str,
    cep: &str,
) -> AppResult<CepInfo> {
    let url = format!("{base_url}/ws/{cep}/json/");
    let response = http.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(AppError::UpstreamGateway {
            message: "ViaCEP returned error".to_string(),
            status: response.status().as_u16(),
        });
    }

    let payload: Value = response.json().await?;
    // ViaCEP signals an unknown code with {"erro": true} and a 200.
    let not_found = payload
        .get("erro")
        .is_some_and(|v| v.as_bool() == Some(true) || v.as_str() == Some("true"));
    if not_found {
        return Err(AppError::NotFound("CEP not found".to_string()));
    }

    Ok(CepInfo {
        logradouro: first_string(&payload, &["logradouro"]),
        complemento: first_string(&payload, &["complemento"]),
        bairro: first_string(&payload, &["bairro"]),
        localidade: first_string(&payload, &["localidade"]),
        uf: first_string(&payload, &["uf"]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_strips_cep_punctuation() {
        assert_eq!(normalize_digits("01310-100"), "01310100");
    }

    #[test]
    fn normalize_strips_cnpj_punctuation() {
        assert_eq!(normalize_digits("11.222.333/0001-81"), "11222333000181");
    }

    #[test]
    fn normalize_of_non_digits_is_empty() {
        assert_eq!(normalize_digits("abc-./"), "");
    }

    #[test]
    fn first_string_prefers_earlier_keys() {
        let payload = json!({"municipio": "Campinas", "city": "Wrong"});
        assert_eq!(
            first_string(&payload, &["municipio", "city", "localidade"]),
            Some("Campinas".to_string())
        );
    }

    #[test]
    fn first_string_falls_back_past_null_and_missing_keys() {
        let payload = json!({"municipio": null, "localidade": "Santos"});
        assert_eq!(
            first_string(&payload, &["municipio", "city", "localidade"]),
            Some("Santos".to_string())
        );
    }

    #[test]
    fn first_value_keeps_structured_activity_field() {
        let payload = json!({"atividades_principais": [{"code": "6201-5/01"}]});
        let value = first_value(&payload, &["atividade_principal", "atividades_principais"]);
        assert_eq!(value, Some(json!([{"code": "6201-5/01"}])));
    }
}
