//! The modal and endpoint for importing transactions from a CSV file.

use axum::{
    Extension,
    extract::{Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use maud::{Markup, html};

use crate::{
    alert::Alert,
    api::{ApiClient, ApiError, NewTransaction, Session},
    dashboard::modal,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, loading_spinner},
    import::parse::{ImportRow, ParseError, REQUIRED_COLUMNS, parse_transactions_csv},
    transaction::validate_transaction,
};

/// The event sent to the browser after transactions were imported. The
/// dashboard content reloads itself when it sees this event.
pub(crate) const TRANSACTIONS_IMPORTED_EVENT: &str = "transactions-imported";

/// The name of the file input in the import form.
const FILE_FIELD: &str = "file";

/// How many failed rows to list in the result alert.
const MAX_LISTED_FAILURES: usize = 3;

fn import_form() -> Markup {
    html! {
        form
            id="import-form"
            hx-post=(endpoints::IMPORT_API)
            enctype="multipart/form-data"
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-disabled-elt="find button"
            hx-on--after-request="if (event.detail.successful) closeModal()"
            class="space-y-4"
        {
            div
            {
                label for=(FILE_FIELD) class=(FORM_LABEL_STYLE) { "CSV file" }
                input
                    type="file"
                    name=(FILE_FIELD)
                    id=(FILE_FIELD)
                    accept="text/csv"
                    required
                    class="block w-full text-sm text-gray-900 border border-gray-300 rounded-lg
                        cursor-pointer bg-gray-50 dark:text-gray-400 dark:bg-gray-700
                        dark:border-gray-600";

                p class="mt-1 text-sm text-gray-500 dark:text-gray-300"
                {
                    "The file needs the columns " (REQUIRED_COLUMNS.join(", ")) "."
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="htmx-indicator" { (loading_spinner()) "Importing..." }
                span class="htmx-idle-label" { "Import" }
            }
        }
    }
}

/// The modal with the form for importing a CSV file.
pub async fn get_import_modal() -> Markup {
    modal("Import Transactions", &import_form())
}

fn bad_request(alert: Alert) -> Response {
    (StatusCode::BAD_REQUEST, alert.into_html()).into_response()
}

/// Read the uploaded CSV file from `field`.
async fn read_csv_field(field: Field<'_>) -> Result<String, Response> {
    if field.content_type() != Some("text/csv") {
        return Err(bad_request(Alert::ErrorSimple {
            message: "File type must be CSV.".to_owned(),
        }));
    }

    let file_name = field.file_name().unwrap_or_default().to_owned();
    let data = field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        bad_request(Alert::ErrorSimple {
            message: "Could not read the uploaded file.".to_owned(),
        })
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(data)
}

/// Find the file input among the fields of the form and read it.
async fn read_upload(multipart: &mut Multipart) -> Result<String, Response> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some(FILE_FIELD) => {
                return read_csv_field(field).await;
            }
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err(bad_request(Alert::ErrorSimple {
                    message: "Choose a CSV file to import.".to_owned(),
                }));
            }
            Err(error) => {
                tracing::error!("Could not read multipart form: {error}");
                return Err(bad_request(Alert::ErrorSimple {
                    message: "Could not read the uploaded file.".to_owned(),
                }));
            }
        }
    }
}

/// What happened to the rows of an imported file.
#[derive(Debug, Default, PartialEq)]
struct ImportSummary {
    total: usize,
    imported: usize,
    /// One message per row that was not imported.
    failures: Vec<String>,
    /// Whether any row failed because of the backend rather than its content.
    backend_failed: bool,
}

impl ImportSummary {
    fn details(&self) -> String {
        let mut details = format!(
            "Imported {} of {} transactions.",
            self.imported, self.total
        );

        for failure in self.failures.iter().take(MAX_LISTED_FAILURES) {
            details.push(' ');
            details.push_str(failure);
        }

        let unlisted = self.failures.len().saturating_sub(MAX_LISTED_FAILURES);
        if unlisted > 0 {
            details.push_str(&format!(" {unlisted} more rows failed."));
        }

        details
    }

    fn into_response(self) -> Response {
        if self.total == 0 {
            return Alert::Success {
                message: "Import completed".to_owned(),
                details: "No income or expense rows were found in the file.".to_owned(),
            }
            .into_response();
        }

        if self.imported == 0 {
            let status = if self.backend_failed {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::BAD_REQUEST
            };
            let alert = Alert::Error {
                message: "No transactions were imported".to_owned(),
                details: self.details(),
            };
            return (status, alert.into_html()).into_response();
        }

        let alert = if self.failures.is_empty() {
            Alert::Success {
                message: "Import completed successfully!".to_owned(),
                details: self.details(),
            }
        } else {
            Alert::Error {
                message: "Some transactions were not imported".to_owned(),
                details: self.details(),
            }
        };

        (
            StatusCode::CREATED,
            [(HX_TRIGGER, TRANSACTIONS_IMPORTED_EVENT)],
            alert.into_html(),
        )
            .into_response()
    }
}

/// Send the valid rows to the backend one at a time.
async fn import_rows(api: &ApiClient, session: &Session, rows: Vec<ImportRow>) -> ImportSummary {
    let mut summary = ImportSummary {
        total: rows.len(),
        ..Default::default()
    };

    for ImportRow { line, form } in rows {
        if let Err(message) = validate_transaction(&form) {
            summary.failures.push(format!("Line {line}: {message}"));
            continue;
        }

        let new_transaction = NewTransaction {
            user_id: session.user_id,
            description: form.description.trim().to_owned(),
            amount: form.amount,
            type_: form.type_,
            category: form.category,
        };

        match api.create_transaction(&new_transaction).await {
            Ok(_) => summary.imported += 1,
            Err(ApiError::Rejected(message)) => {
                summary.failures.push(format!("Line {line}: {message}"));
                summary.backend_failed = true;
            }
            Err(error) => {
                tracing::error!("Could not import line {line}: {error}");
                summary
                    .failures
                    .push(format!("Line {line}: the transaction could not be saved."));
                summary.backend_failed = true;
            }
        }
    }

    summary
}

/// Route handler for importing transactions from an uploaded CSV file.
///
/// Every income and expense row is created through the finance API. The
/// response is an alert with the number of imported rows, and the dashboard
/// is told to reload when anything was imported.
pub async fn import_transactions_endpoint(
    State(api): State<ApiClient>,
    Extension(session): Extension<Session>,
    mut multipart: Multipart,
) -> Response {
    let text = match read_upload(&mut multipart).await {
        Ok(text) => text,
        Err(response) => return response,
    };

    let rows = match parse_transactions_csv(&text) {
        Ok(rows) => rows,
        Err(error) => {
            tracing::debug!("Failed to parse CSV: {error}");
            let details = match error {
                ParseError::MissingColumns(_) => {
                    format!("The file needs the columns {}.", REQUIRED_COLUMNS.join(", "))
                }
                error => format!("Check the file and try again ({error})."),
            };
            return bad_request(Alert::Error {
                message: "Failed to parse CSV".to_owned(),
                details,
            });
        }
    };

    let summary = import_rows(&api, &session, rows).await;
    tracing::info!(
        "Imported {} of {} transactions for user {}",
        summary.imported,
        summary.total,
        session.user_id
    );

    summary.into_response()
}
