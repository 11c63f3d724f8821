use uuid::Uuid;

use crate::client::{ClientError, PredictionClient};
use crate::types::PredictionRequest;
use crate::ui::{SubmitGuard, Ui};
use crate::view::render;

pub const SUBMIT_LABEL: &str = "Predict";
pub const PENDING_LABEL: &str = "Analyzing...";

/// One full submission cycle: pending state, POST, render or notify, and a
/// guaranteed restore of the submit control on every exit path.
///
/// Errors are surfaced through the UI before being returned, so callers only
/// use the result to pick an exit status.
#[tracing::instrument(skip(client, ui, form), fields(field_count = form.fields.len()))]
pub async fn submit(
    client: &dyn PredictionClient,
    ui: &dyn Ui,
    form: PredictionRequest,
) -> Result<(), ClientError> {
    let submission_id = format!("submit-{}", Uuid::new_v4().simple());
    tracing::info!(%submission_id, "Submitting prediction request");

    let _guard = SubmitGuard::engage(ui, SUBMIT_LABEL, PENDING_LABEL);

    match client.predict(form).await {
        Ok(response) => {
            tracing::info!(
                prediction = response.prediction,
                risk_level = %response.risk_level,
                "Prediction received"
            );
            ui.show_result(&render(&response));
            Ok(())
        }
        Err(ClientError::Api { status, message }) => {
            tracing::error!(%status, "Prediction rejected by the service");
            ui.notify(&format!("Error: {message}"));
            Err(ClientError::Api { status, message })
        }
        Err(err) => {
            tracing::error!(error = %err, "Prediction request failed");
            ui.notify(&format!("Error making prediction: {err}"));
            Err(err)
        }
    }
}
