use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One company-registration form submission.
///
/// Every field is optional on the wire; absent fields are persisted as
/// NULL. The seven tax flags default to false when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmissionForm {
    pub nome: Option<String>,
    pub endereco: Option<String>,
    /// Street number; legacy clients send this capitalized.
    #[serde(alias = "Numero")]
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub cep: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub telefone1: Option<String>,
    pub telefone2: Option<String>,
    pub pessoa_contato: Option<String>,
    pub email_fiscal: Option<String>,
    pub email_financeiro: Option<String>,
    pub email_responsavel: Option<String>,
    pub banco: Option<String>,
    pub agencia: Option<String>,
    pub conta: Option<String>,
    /// Attachment name; on the multipart path the uploaded file's name
    /// takes precedence over this field.
    pub comprovante_filename: Option<String>,
    /// Base64-encoded proof-of-payment document (JSON path only).
    pub comprovante_base64: Option<String>,
    pub cnpj: Option<String>,
    pub inscricao_estadual: Option<String>,
    pub inscricao_municipal: Option<String>,
    pub cnae: Option<String>,
    pub pis_cofins: Option<String>,
    pub regime_tributario: Option<String>,
    pub faixa_faturamento: Option<String>,
    pub irrf: Option<bool>,
    pub csll: Option<bool>,
    pub pis: Option<bool>,
    pub cofins: Option<bool>,
    pub inss: Option<bool>,
    pub iss: Option<bool>,
    pub contribuicoes: Option<bool>,
    pub cpf: Option<String>,
    pub dependentes: Option<String>,
}

/// Acknowledgment returned by both submission endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }
}

/// Reshaped tax-registry lookup result.
///
/// Every field is nullable: a key missing from the upstream payload is
/// reported as null rather than failing the request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SintegraInfo {
    pub logradouro: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub municipio: Option<String>,
    pub uf: Option<String>,
    /// Passed through as-is; upstream sends either an object or a list.
    #[schema(value_type = Option<Object>)]
    pub atividade_principal: Option<serde_json::Value>,
}

/// Reshaped postal-code lookup result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CepInfo {
    pub logradouro: Option<String>,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
}

/// One row of the static bank reference table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Bank {
    pub numero: i32,
    pub chave: Option<String>,
    pub nome: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SintegraQuery {
    pub cnpj: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CepQuery {
    pub cep: Option<String>,
}
