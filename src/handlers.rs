use crate::db;
use crate::error::{AppError, AppResult};
use crate::lookup::{cep_lookup, normalize_digits, sintegra_lookup};
use crate::state::AppState;
use crate::types::{
    Bank, CepInfo, CepQuery, SintegraInfo, SintegraQuery, SubmissionForm, SubmitResponse,
};
use axum::{
    extract::{multipart::Field, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::{error, info, warn};

/// Overall request body cap, matching the JSON body-parser limit of the
/// front end.
pub const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Upload cap for the proof-of-payment file.
pub const MAX_COMPROVANTE_BYTES: usize = 5 * 1024 * 1024;

/// Placeholder written into log lines in place of the attachment body.
pub const BASE64_PLACEHOLDER: &str = "[BASE64_REMOVED]";

/// Submission payload with the attachment field redacted, safe to log.
pub(crate) fn sanitized_payload(form: &SubmissionForm) -> Value {
    let mut payload = serde_json::to_value(form).unwrap_or(Value::Null);
    if let Some(fields) = payload.as_object_mut() {
        if fields
            .get("comprovante_base64")
            .is_some_and(|v| !v.is_null())
        {
            fields.insert(
                "comprovante_base64".to_string(),
                Value::String(BASE64_PLACEHOLDER.to_string()),
            );
        }
    }
    payload
}

/// Failure envelope for the submission endpoints: unlike the lookup
/// endpoints these always carry an explicit success flag.
fn submit_failure(err: AppError) -> Response {
    let status = err.status_code();
    error!("submit failed: {}", err);
    (
        status,
        Json(json!({ "success": false, "error": err.to_string() })),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/submit",
    request_body = SubmissionForm,
    responses(
        (status = 200, description = "Submission persisted", body = SubmitResponse),
        (status = 400, description = "Malformed attachment encoding"),
        (status = 500, description = "Database not configured or insert failed")
    ),
    tag = "Submissions"
)]
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> Response {
    info!(payload = %sanitized_payload(&form), "submission received (JSON)");

    match submit_json_inner(&state, form).await {
        Ok(()) => Json(SubmitResponse::ok()).into_response(),
        Err(err) => submit_failure(err),
    }
}

async fn submit_json_inner(state: &AppState, mut form: SubmissionForm) -> AppResult<()> {
    let attachment = match form.comprovante_base64.take() {
        Some(encoded) => {
            // Clients line-wrap base64; whitespace is not part of the
            // encoded payload.
            let compact: String = encoded
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            Some(STANDARD.decode(compact.as_bytes()).map_err(|e| {
                AppError::Validation(format!("invalid comprovante_base64: {e}"))
            })?)
        }
        None => None,
    };

    let pool = state.pool()?;
    db::insert_submission(pool, &form, attachment).await
}

pub async fn submit_multipart_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let (form, attachment) = match parse_submission_form(multipart).await {
        Ok(parsed) => parsed,
        Err(err) => return submit_failure(err),
    };

    // Field validation happens before any database interaction. Empty
    // strings were already coerced to None while parsing; any other
    // non-empty value counts, whitespace included.
    if form.nome.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "errors": [{ "msg": "nome is required", "param": "nome" }],
            })),
        )
            .into_response();
    }
    if form.cnpj.is_none() && form.cpf.is_none() {
        return submit_failure(AppError::Validation(
            "cnpj ou cpf obrigatório".to_string(),
        ));
    }

    match submit_multipart_inner(&state, &form, attachment).await {
        Ok(()) => Json(SubmitResponse::ok()).into_response(),
        Err(err) => submit_failure(err),
    }
}

async fn submit_multipart_inner(
    state: &AppState,
    form: &SubmissionForm,
    attachment: Option<Vec<u8>>,
) -> AppResult<()> {
    let pool = state.pool()?;
    db::insert_submission(pool, form, attachment).await
}

fn truthy(text: &str) -> bool {
    matches!(text.to_ascii_lowercase().as_str(), "true" | "1" | "on")
}

async fn text_field(field: Field<'_>) -> AppResult<Option<String>> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))?;
    // Form posts send empty strings for untouched inputs.
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Collects the multipart fields into the same [`SubmissionForm`] the
/// JSON path uses, plus the uploaded attachment bytes if any.
async fn parse_submission_form(
    mut multipart: Multipart,
) -> AppResult<(SubmissionForm, Option<Vec<u8>>)> {
    let mut form = SubmissionForm::default();
    let mut attachment: Option<Vec<u8>> = None;
    let mut uploaded_filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "comprovante_bancario" => {
                uploaded_filename = field.file_name().map(str::to_owned);
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("invalid comprovante_bancario upload: {e}"))
                })?;
                if data.len() > MAX_COMPROVANTE_BYTES {
                    return Err(AppError::Validation(
                        "comprovante_bancario exceeds the 5MB limit".to_string(),
                    ));
                }
                attachment = Some(data.to_vec());
            }
            "nome" => form.nome = text_field(field).await?,
            "endereco" => form.endereco = text_field(field).await?,
            "numero" | "Numero" => form.numero = text_field(field).await?,
            "complemento" => form.complemento = text_field(field).await?,
            "cep" => form.cep = text_field(field).await?,
            "bairro" => form.bairro = text_field(field).await?,
            "cidade" => form.cidade = text_field(field).await?,
            "estado" => form.estado = text_field(field).await?,
            "telefone1" => form.telefone1 = text_field(field).await?,
            "telefone2" => form.telefone2 = text_field(field).await?,
            "pessoa_contato" => form.pessoa_contato = text_field(field).await?,
            "email_fiscal" => form.email_fiscal = text_field(field).await?,
            "email_financeiro" => form.email_financeiro = text_field(field).await?,
            "email_responsavel" => form.email_responsavel = text_field(field).await?,
            "banco" => form.banco = text_field(field).await?,
            "agencia" => form.agencia = text_field(field).await?,
            "conta" => form.conta = text_field(field).await?,
            "comprovante_filename" => form.comprovante_filename = text_field(field).await?,
            "cnpj" => form.cnpj = text_field(field).await?,
            "inscricao_estadual" => form.inscricao_estadual = text_field(field).await?,
            "inscricao_municipal" => form.inscricao_municipal = text_field(field).await?,
            "cnae" => form.cnae = text_field(field).await?,
            "pis_cofins" => form.pis_cofins = text_field(field).await?,
            "regime_tributario" => form.regime_tributario = text_field(field).await?,
            "faixa_faturamento" => form.faixa_faturamento = text_field(field).await?,
            "irrf" => form.irrf = text_field(field).await?.map(|t| truthy(&t)),
            "csll" => form.csll = text_field(field).await?.map(|t| truthy(&t)),
            "pis" => form.pis = text_field(field).await?.map(|t| truthy(&t)),
            "cofins" => form.cofins = text_field(field).await?.map(|t| truthy(&t)),
            "inss" => form.inss = text_field(field).await?.map(|t| truthy(&t)),
            "iss" => form.iss = text_field(field).await?.map(|t| truthy(&t)),
            "contribuicoes" => form.contribuicoes = text_field(field).await?.map(|t| truthy(&t)),
            "cpf" => form.cpf = text_field(field).await?,
            "dependentes" => form.dependentes = text_field(field).await?,
            other => {
                warn!("Unknown multipart field: {}", other);
            }
        }
    }

    // The uploaded file's own name wins over the text field.
    if attachment.is_some() && uploaded_filename.is_some() {
        form.comprovante_filename = uploaded_filename;
    }

    Ok((form, attachment))
}

#[utoipa::path(
    get,
    path = "/api/sintegra",
    params(("cnpj" = String, Query, description = "Corporate tax ID, punctuation tolerated")),
    responses(
        (status = 200, description = "Reshaped registry record", body = SintegraInfo),
        (status = 400, description = "Missing or non-numeric cnpj"),
        (status = 502, description = "Registry service returned an error")
    ),
    tag = "Lookups"
)]
pub async fn sintegra_handler(
    State(state): State<AppState>,
    Query(query): Query<SintegraQuery>,
) -> AppResult<Json<SintegraInfo>> {
    let cnpj = normalize_digits(query.cnpj.as_deref().unwrap_or(""));
    if cnpj.is_empty() {
        return Err(AppError::Validation(
            "cnpj query parameter required".to_string(),
        ));
    }

    let token = state
        .settings
        .sintegra_token
        .as_deref()
        .ok_or_else(|| AppError::ConfigMissing("Sintegra token not configured".to_string()))?;

    info!("Sintegra lookup for cnpj={}", cnpj);
    let info = sintegra_lookup(&state.http, &state.settings.sintegra_base_url, token, &cnpj).await?;
    Ok(Json(info))
}

#[utoipa::path(
    get,
    path = "/api/cep",
    params(("cep" = String, Query, description = "8-digit postal code, punctuation tolerated")),
    responses(
        (status = 200, description = "Reshaped address fragment", body = CepInfo),
        (status = 400, description = "Postal code does not normalize to 8 digits"),
        (status = 404, description = "Postal code unknown upstream"),
        (status = 502, description = "Address service returned an error")
    ),
    tag = "Lookups"
)]
pub async fn cep_handler(
    State(state): State<AppState>,
    Query(query): Query<CepQuery>,
) -> AppResult<Json<CepInfo>> {
    let cep = normalize_digits(query.cep.as_deref().unwrap_or(""));
    if cep.len() != 8 {
        return Err(AppError::Validation(
            "cep query parameter required and must be 8 digits".to_string(),
        ));
    }

    info!("CEP lookup for cep={}", cep);
    let info = cep_lookup(&state.http, &state.settings.viacep_base_url, &cep).await?;
    Ok(Json(info))
}

#[utoipa::path(
    get,
    path = "/api/bancos",
    responses(
        (status = 200, description = "Bank list ascending by code", body = [Bank]),
        (status = 500, description = "Database not configured or query failed")
    ),
    tag = "Lookups"
)]
pub async fn bancos_handler(State(state): State<AppState>) -> Response {
    let result = match state.pool() {
        Ok(pool) => db::list_banks(pool).await,
        Err(err) => return err.into_response(),
    };

    match result {
        Ok(banks) => Json(banks).into_response(),
        Err(err) => {
            // This endpoint does not leak the underlying message.
            error!("bancos list error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Erro ao obter lista de bancos" })),
            )
                .into_response()
        }
    }
}
