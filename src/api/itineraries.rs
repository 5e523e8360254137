//! Itinerary generation, report retrieval and CSV export.

use futures_util::{Stream, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{GeneratedItinerary, ItineraryReport, ItineraryRequest};

#[derive(Deserialize)]
struct ReportEnvelope {
    detail: ItineraryReport,
}

/// File name offered for the CSV export of an itinerary.
pub fn csv_filename(itinerary_id: i64) -> String {
    format!("itinerary_report_{}.csv", itinerary_id)
}

/// Submit a generation request. No retry on failure.
pub async fn generate_itinerary(api: &ApiClient, request: &ItineraryRequest) -> Result<GeneratedItinerary, ApiError> {
    tracing::info!(
        country = %request.country_code,
        region = %request.region_code,
        days = request.days,
        landmarks = request.selected_landmark_ids.len(),
        "Submitting itinerary generation"
    );
    api.post_json("/api/itineraries/generate", request).await
}

pub async fn load_report(api: &ApiClient, itinerary_id: i64) -> Result<ItineraryReport, ApiError> {
    let endpoint = format!("/api/itineraries/{}/report", itinerary_id);
    let envelope: ReportEnvelope = api.get_json(&endpoint, &[]).await?;
    Ok(envelope.detail)
}

/// Fetch the CSV bytes exactly as the backend produced them.
pub async fn download_csv(api: &ApiClient, itinerary_id: i64) -> Result<Vec<u8>, ApiError> {
    let endpoint = format!("/api/itineraries/{}/csv", itinerary_id);
    let resp = api.get(&endpoint, &[]).await?;
    let bytes = resp.bytes().await.map_err(ApiError::from_reqwest)?;
    Ok(bytes.to_vec())
}

/// Stream the CSV export into `dest_path`, optionally drawing a progress bar.
/// Returns the number of bytes written.
pub async fn download_csv_to(
    api: &ApiClient,
    itinerary_id: i64,
    dest_path: &Path,
    show_progress: bool,
) -> Result<u64, ApiError> {
    let endpoint = format!("/api/itineraries/{}/csv", itinerary_id);
    let resp = api.get(&endpoint, &[]).await?;

    let pb = if !show_progress {
        ProgressBar::hidden()
    } else if let Some(size) = resp.content_length() {
        let pb = ProgressBar::new(size);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes}")
                .map_err(|e| ApiError::Decode(format!("Failed to set progress style: {}", e)))?
                .progress_chars("#>-"),
        );
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} Downloaded {bytes}")
                .map_err(|e| ApiError::Decode(format!("Failed to set progress style: {}", e)))?,
        );
        pb
    };

    let downloaded = write_stream_to(resp.bytes_stream().map(|c| c.map_err(ApiError::from_reqwest)), dest_path, &pb).await?;
    pb.finish_and_clear();

    tracing::info!("Downloaded {} bytes to {:?}", downloaded, dest_path);
    Ok(downloaded)
}

/// Stream chunks into `dest_path` through a `.part` sibling that is renamed
/// into place once complete. A failed download leaves no file behind.
async fn write_stream_to<S, B>(stream: S, dest_path: &Path, pb: &ProgressBar) -> Result<u64, ApiError>
where
    S: Stream<Item = Result<B, ApiError>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);
    let mut part = dest_path.as_os_str().to_owned();
    part.push(".part");
    let part_path = PathBuf::from(part);

    let result = async {
        let mut file = tokio::fs::File::create(&part_path)
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to create {}: {}", part_path.display(), e)))?;
        let mut downloaded = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            let chunk = chunk.as_ref();
            file.write_all(chunk)
                .await
                .map_err(|e| ApiError::Transport(format!("Failed to write to file: {}", e)))?;
            downloaded += chunk.len() as u64;
            pb.set_position(downloaded);
        }
        file.flush()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to flush file: {}", e)))?;
        tokio::fs::rename(&part_path, dest_path)
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to move {} into place: {}", dest_path.display(), e)))?;
        Ok(downloaded)
    }
    .await;

    if result.is_err() {
        pb.abandon();
        if let Err(e) = tokio::fs::remove_file(&part_path).await {
            tracing::debug!(%e, "No partial download to remove");
        }
    }
    result
}
