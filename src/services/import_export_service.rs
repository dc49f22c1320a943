use crate::error::{Error, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::lead::LeadStatus;
use crate::models::lead_log::LeadAction;
use crate::services::lead_log_service::LeadLogService;
use futures::TryStreamExt;
use serde::Serialize;
use sqlx::{Acquire, FromRow, PgConnection, PgPool};
use uuid::Uuid;

pub const EXPORT_HEADERS: [&str; 5] = ["LeadID", "Name", "ContactInfo", "Status", "AssignedTo"];

#[derive(Debug, Clone, FromRow)]
pub struct ExportRow {
    pub id: Uuid,
    pub name: String,
    pub contact_info: String,
    pub status: LeadStatus,
    pub assigned_to: Option<String>,
}

/// A CSV row that carried both required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub name: String,
    pub contact_info: String,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
pub struct ParsedImport {
    pub rows: Vec<ImportRow>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub message: String,
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Clone)]
pub struct ImportExportService {
    pool: PgPool,
}

impl ImportExportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Streams every lead out of the database straight into CSV bytes.
    pub async fn export_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv_writer()?;
        let mut rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT l.id, l.name, l.contact_info, l.status, u.username AS assigned_to
            FROM leads l
            LEFT JOIN users u ON u.id = l.assigned_user_id
            ORDER BY l.created_at DESC, l.id
            "#,
        )
        .fetch(&self.pool);

        let mut count = 0usize;
        while let Some(row) = rows.try_next().await? {
            write_row(&mut writer, &row)?;
            count += 1;
        }

        let bytes = finish(writer)?;
        tracing::info!(rows = count, "leads exported");
        Ok(bytes)
    }

    /// Inserts the parsed rows as Pending leads created by `admin`. Each row
    /// runs under its own savepoint so one bad row never undoes the others.
    pub async fn import(&self, parsed: ParsedImport, admin: &CurrentUser) -> Result<ImportSummary> {
        let mut imported = 0usize;
        let mut skipped = parsed.skipped;

        let mut tx = self.pool.begin().await?;
        for row in &parsed.rows {
            let mut savepoint = (&mut tx).begin().await?;
            match insert_imported(&mut savepoint, row, admin.user_id).await {
                Ok(lead_id) => {
                    savepoint.commit().await?;
                    imported += 1;
                    tracing::debug!(%lead_id, "lead imported");
                }
                Err(err) => {
                    savepoint.rollback().await?;
                    skipped += 1;
                    tracing::debug!(error = %err, name = %row.name, "import row skipped");
                }
            }
        }
        tx.commit().await?;

        tracing::info!(imported, skipped, by = %admin.user_id, "lead import finished");
        Ok(ImportSummary {
            message: "Import complete.".to_string(),
            imported,
            skipped,
        })
    }
}

async fn insert_imported(conn: &mut PgConnection, row: &ImportRow, creator: Uuid) -> Result<Uuid> {
    let lead_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO leads (name, contact_info, status, notes, created_by_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&row.name)
    .bind(&row.contact_info)
    .bind(LeadStatus::Pending)
    .bind(&row.notes)
    .bind(creator)
    .fetch_one(&mut *conn)
    .await?;

    LeadLogService::record(
        conn,
        lead_id,
        creator,
        LeadAction::Imported,
        "Lead imported via CSV",
    )
    .await?;
    Ok(lead_id)
}

fn csv_writer() -> Result<csv::Writer<Vec<u8>>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;
    Ok(writer)
}

fn write_row(writer: &mut csv::Writer<Vec<u8>>, row: &ExportRow) -> Result<()> {
    let id = row.id.to_string();
    writer.write_record([
        id.as_str(),
        row.name.as_str(),
        row.contact_info.as_str(),
        row.status.as_str(),
        row.assigned_to.as_deref().unwrap_or(""),
    ])?;
    Ok(())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>> {
    writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("Failed to flush CSV: {}", e)))
}

/// Encodes already-loaded rows with the export header.
pub fn encode_csv(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut writer = csv_writer()?;
    for row in rows {
        write_row(&mut writer, row)?;
    }
    finish(writer)
}

/// Reads an uploaded CSV. The header row must name `Name` and `ContactInfo`
/// (case-insensitive, `Notes` optional). Rows past `max_rows` are ignored;
/// unreadable rows and rows with a blank required field count as skipped.
pub fn parse_import(bytes: &[u8], max_rows: usize) -> Result<ParsedImport> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::BadRequest(format!("Unreadable CSV header: {}", e)))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(name_idx), Some(contact_idx)) = (column("Name"), column("ContactInfo")) else {
        return Err(Error::BadRequest(
            "CSV must have Name and ContactInfo columns.".to_string(),
        ));
    };
    let notes_idx = column("Notes");

    let mut parsed = ParsedImport::default();
    for record in reader.records().take(max_rows) {
        let Ok(record) = record else {
            parsed.skipped += 1;
            continue;
        };
        let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");
        let (name, contact_info) = (field(name_idx), field(contact_idx));
        if name.is_empty() || contact_info.is_empty() {
            parsed.skipped += 1;
            continue;
        }
        let notes = notes_idx
            .map(field)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        parsed.rows.push(ImportRow {
            name: name.to_string(),
            contact_info: contact_info.to_string(),
            notes,
        });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_complete_rows_and_counts_the_rest() {
        let csv = "Name,ContactInfo\nAcme,555-1\nNoContact,\n,555-3\n";
        let parsed = parse_import(csv.as_bytes(), 100).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].name, "Acme");
        assert_eq!(parsed.rows[0].contact_info, "555-1");
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn parse_tolerates_bom_case_and_short_rows() {
        let csv = "\u{feff}name,CONTACTINFO,Notes\n Bob Co , bob@x.com ,vip\nShort\n";
        let parsed = parse_import(csv.as_bytes(), 100).unwrap();
        assert_eq!(
            parsed.rows,
            vec![ImportRow {
                name: "Bob Co".into(),
                contact_info: "bob@x.com".into(),
                notes: Some("vip".into()),
            }]
        );
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn parse_requires_both_columns() {
        let err = parse_import(b"Name,Phone\nAcme,1\n", 100).unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[test]
    fn parse_ignores_rows_past_the_limit() {
        let csv = "Name,ContactInfo\na,1\nb,2\nc,3\n";
        let parsed = parse_import(csv.as_bytes(), 2).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn encode_quotes_fields_and_blanks_missing_assignee() {
        let id = Uuid::new_v4();
        let rows = vec![ExportRow {
            id,
            name: "Smith, Jones & Co".into(),
            contact_info: "555".into(),
            status: LeadStatus::Active,
            assigned_to: None,
        }];
        let text = String::from_utf8(encode_csv(&rows).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("LeadID,Name,ContactInfo,Status,AssignedTo"));
        assert_eq!(
            lines.next(),
            Some(format!("{},\"Smith, Jones & Co\",555,Active,", id).as_str())
        );
        assert_eq!(lines.next(), None);
    }
}
