use crate::error::AppResult;
use crate::types::{Bank, SubmissionForm};
use sqlx::PgPool;
use tracing::info;

const INSERT_SUBMISSION_SQL: &str = "\
INSERT INTO submissoes_bra \
(nome, endereco, numero, complemento, cep, bairro, cidade, estado, \
 telefone1, telefone2, pessoa_contato, \
 email_fiscal, email_financeiro, email_responsavel, \
 banco, agencia, conta, comprovante_filename, comprovante_data, \
 cnpj, inscricao_estadual, inscricao_municipal, cnae, \
 pis_cofins, regime_tributario, faixa_faturamento, \
 irrf, csll, pis, cofins, inss, iss, contribuicoes, \
 cpf, dependentes) \
VALUES \
($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, \
 $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32, \
 $33, $34, $35)";

/// Inserts one submission row.
///
/// Shared by the JSON and multipart paths; the attachment bytes are the
/// only input that differs between the two (decoded base64 vs. uploaded
/// file contents).
pub async fn insert_submission(
    pool: &PgPool,
    form: &SubmissionForm,
    attachment: Option<Vec<u8>>,
) -> AppResult<()> {
    sqlx::query(INSERT_SUBMISSION_SQL)
        .bind(&form.nome)
        .bind(&form.endereco)
        .bind(&form.numero)
        .bind(&form.complemento)
        .bind(&form.cep)
        .bind(&form.bairro)
        .bind(&form.cidade)
        .bind(&form.estado)
        .bind(&form.telefone1)
        .bind(&form.telefone2)
        .bind(&form.pessoa_contato)
        .bind(&form.email_fiscal)
        .bind(&form.email_financeiro)
        .bind(&form.email_responsavel)
        .bind(&form.banco)
        .bind(&form.agencia)
        .bind(&form.conta)
        .bind(&form.comprovante_filename)
        .bind(attachment)
        .bind(&form.cnpj)
        .bind(&form.inscricao_estadual)
        .bind(&form.inscricao_municipal)
        .bind(&form.cnae)
        .bind(&form.pis_cofins)
        .bind(&form.regime_tributario)
        .bind(&form.faixa_faturamento)
        .bind(form.irrf.unwrap_or(false))
        .bind(form.csll.unwrap_or(false))
        .bind(form.pis.unwrap_or(false))
        .bind(form.cofins.unwrap_or(false))
        .bind(form.inss.unwrap_or(false))
        .bind(form.iss.unwrap_or(false))
        .bind(form.contribuicoes.unwrap_or(false))
        .bind(&form.cpf)
        .bind(&form.dependentes)
        .execute(pool)
        .await?;

    info!("submission persisted");
    Ok(())
}

const LIST_BANKS_SQL: &str = "SELECT numero_banco, chave_banco, nome_instituicao \
     FROM lista_bancos ORDER BY numero_banco";

#[derive(Debug, sqlx::FromRow)]
struct BankRow {
    numero_banco: i32,
    chave_banco: Option<String>,
    nome_instituicao: Option<String>,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Bank {
            numero: row.numero_banco,
            chave: row.chave_banco,
            nome: row.nome_instituicao,
        }
    }
}

/// One output object per row, in query order.
fn reshape_banks(rows: Vec<BankRow>) -> Vec<Bank> {
    rows.into_iter().map(Bank::from).collect()
}

/// Returns the static bank reference list, ascending by bank code.
pub async fn list_banks(pool: &PgPool) -> AppResult<Vec<Bank>> {
    let rows: Vec<BankRow> = sqlx::query_as(LIST_BANKS_SQL).fetch_all(pool).await?;
    Ok(reshape_banks(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<BankRow> {
        vec![
            BankRow {
                numero_banco: 1,
                chave_banco: Some("bb".to_string()),
                nome_instituicao: Some("Banco do Brasil".to_string()),
            },
            BankRow {
                numero_banco: 104,
                chave_banco: Some("cef".to_string()),
                nome_instituicao: Some("Caixa Econômica Federal".to_string()),
            },
            BankRow {
                numero_banco: 341,
                chave_banco: None,
                nome_instituicao: Some("Itaú Unibanco".to_string()),
            },
        ]
    }

    #[test]
    fn bank_query_orders_ascending_by_code() {
        assert!(LIST_BANKS_SQL.contains("ORDER BY numero_banco"));
    }

    #[test]
    fn bank_reshaping_preserves_row_count_and_order() {
        let rows = sample_rows();
        let count = rows.len();
        let banks = reshape_banks(rows);

        assert_eq!(banks.len(), count);
        let codes: Vec<i32> = banks.iter().map(|b| b.numero).collect();
        assert_eq!(codes, vec![1, 104, 341]);
    }

    #[test]
    fn bank_reshaping_maps_all_three_columns() {
        let banks = reshape_banks(sample_rows());

        assert_eq!(banks[0].chave.as_deref(), Some("bb"));
        assert_eq!(banks[0].nome.as_deref(), Some("Banco do Brasil"));
        assert_eq!(banks[2].chave, None);
        assert_eq!(banks[2].nome.as_deref(), Some("Itaú Unibanco"));
    }
}
