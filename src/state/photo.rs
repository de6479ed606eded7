//! Photo AI screen state
//!
//! Empty -> Analyzing -> Identified, with `clear()` returning to Empty from
//! anywhere. Analysis is a fixed delay followed by a random pick from
//! [`LANDMARKS`]; the actual pixels never matter.
//!
//! Dismissing cancels the in-flight analysis, and a new image supersedes the
//! previous one: only the completion carrying the live ticket is applied.

use std::sync::Arc;
use std::time::Duration;

use super::data::{LandmarkRecord, CAPTURE_URLS, LANDMARKS};
use super::pending::{Pending, Ticket};
use crate::error::PhotoError;
use crate::host::preview::ImagePreview;
use crate::host::random::{choose, Picker};

/// Where the photo came from
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A local file, decoded for display
    Uploaded(ImagePreview),
    /// The simulated camera: one of the fixed remote images
    Captured(&'static str),
}

impl ImageSource {
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Uploaded(preview) => {
                format!("{} ({}x{})", preview.path.display(), preview.width, preview.height)
            }
            ImageSource::Captured(url) => url.to_string(),
        }
    }
}

/// Where the pipeline currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoStage {
    #[default]
    Empty,
    Analyzing,
    Identified(&'static LandmarkRecord),
}

/// Everything the Photo AI screen remembers
#[derive(Debug, Clone, Default)]
pub struct PhotoAnalysis {
    stage: PhotoStage,
    image: Option<ImageSource>,
    analysis: Pending,
    /// File read/decode in flight
    upload: Pending,
    /// Last problem worth telling the user about
    status: Option<String>,
}

impl PhotoAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PhotoStage {
        self.stage
    }

    pub fn image(&self) -> Option<&ImageSource> {
        self.image.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.upload.is_pending()
    }

    /// The user picked a file; the caller reads it under the returned ticket
    pub fn begin_upload(&mut self) -> Ticket {
        self.status = None;
        self.upload.start()
    }

    /// Apply a finished file read.
    ///
    /// On success analysis starts and its ticket is returned. A failed read
    /// leaves the stage alone and records a status message.
    pub fn finish_upload(
        &mut self,
        ticket: Ticket,
        result: Result<ImagePreview, PhotoError>,
    ) -> Option<Ticket> {
        if !self.upload.settle(ticket) {
            tracing::debug!("Ignoring stale upload (ticket {})", ticket.id());
            return None;
        }

        match result {
            Ok(preview) => Some(self.submit(ImageSource::Uploaded(preview))),
            Err(e) => {
                tracing::warn!("⚠️  Upload failed: {}", e);
                self.status = Some(e.to_string());
                None
            }
        }
    }

    /// Simulated camera: pick one of the fixed images and analyze it
    pub fn capture(&mut self, picker: &dyn Picker) -> Ticket {
        let url = choose(picker, &CAPTURE_URLS).copied().unwrap_or(CAPTURE_URLS[0]);
        self.submit(ImageSource::Captured(url))
    }

    /// Show `source` and start analyzing it, superseding any earlier analysis
    /// and any file read still in flight
    pub fn submit(&mut self, source: ImageSource) -> Ticket {
        if let Some(upload) = self.upload.cancel() {
            tracing::debug!("Dropping in-flight upload (ticket {})", upload.id());
        }
        let ticket = self.analysis.start();
        tracing::info!("🔍 Analyzing {} (ticket {})", source.describe(), ticket.id());

        self.image = Some(source);
        self.stage = PhotoStage::Analyzing;
        self.status = None;
        ticket
    }

    /// Apply a finished analysis. Returns `false` for a stale ticket.
    pub fn complete(&mut self, ticket: Ticket, record: &'static LandmarkRecord) -> bool {
        if !self.analysis.settle(ticket) {
            tracing::debug!("Ignoring stale analysis (ticket {})", ticket.id());
            return false;
        }

        tracing::info!("✅ Identified {}", record.name);
        self.stage = PhotoStage::Identified(record);
        true
    }

    /// Dismiss the image and anything pending for it
    pub fn clear(&mut self) {
        self.analysis.cancel();
        self.upload.cancel();
        self.image = None;
        self.stage = PhotoStage::Empty;
        self.status = None;
    }
}

/// Simulated classifier: wait, then pick a record at random
pub async fn analyze(delay: Duration, picker: Arc<dyn Picker>) -> &'static LandmarkRecord {
    tokio::time::sleep(delay).await;
    choose(picker.as_ref(), &LANDMARKS).unwrap_or(&LANDMARKS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::random::{FixedPicker, OsPicker};
    use iced::widget::image::Handle;
    use std::path::PathBuf;

    const DELAY: Duration = Duration::from_secs(3);

    fn preview() -> ImagePreview {
        ImagePreview {
            path: PathBuf::from("/tmp/holiday.png"),
            width: 1,
            height: 1,
            handle: Handle::from_rgba(1, 1, vec![0u8; 4]),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_then_analysis_yields_known_record() {
        for index in 0..CAPTURE_URLS.len() {
            let picker = FixedPicker(index);
            let mut state = PhotoAnalysis::new();

            let ticket = state.capture(&picker);
            assert_eq!(state.stage(), PhotoStage::Analyzing);
            match state.image() {
                Some(ImageSource::Captured(url)) => assert_eq!(*url, CAPTURE_URLS[index]),
                other => panic!("unexpected image {:?}", other),
            }

            let record = analyze(DELAY, Arc::new(picker)).await;
            assert!(state.complete(ticket, record));
            assert_eq!(state.stage(), PhotoStage::Identified(&LANDMARKS[index]));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_analysis_never_leaves_the_table() {
        let picker: Arc<dyn Picker> = Arc::new(OsPicker);
        for _ in 0..50 {
            let record = analyze(DELAY, picker.clone()).await;
            assert!(LANDMARKS.iter().any(|known| std::ptr::eq(known, record)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_takes_the_full_delay() {
        let early = tokio::time::timeout(
            Duration::from_millis(2_999),
            analyze(DELAY, Arc::new(FixedPicker(0))),
        )
        .await;
        assert!(early.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_then_analysis() {
        let mut state = PhotoAnalysis::new();
        let upload = state.begin_upload();
        assert!(state.is_loading());
        assert_eq!(state.stage(), PhotoStage::Empty);

        let ticket = state.finish_upload(upload, Ok(preview())).unwrap();
        assert!(!state.is_loading());
        assert_eq!(state.stage(), PhotoStage::Analyzing);
        assert!(matches!(state.image(), Some(ImageSource::Uploaded(_))));

        let record = analyze(DELAY, Arc::new(FixedPicker(2))).await;
        assert!(state.complete(ticket, record));
        assert_eq!(state.stage(), PhotoStage::Identified(&LANDMARKS[2]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_during_analysis_stays_empty() {
        let mut state = PhotoAnalysis::new();
        let ticket = state.capture(&FixedPicker(0));

        state.clear();
        assert_eq!(state.stage(), PhotoStage::Empty);

        // The delayed completion still arrives, but must not resurrect a result
        let record = analyze(DELAY, Arc::new(FixedPicker(1))).await;
        assert!(!state.complete(ticket, record));
        assert_eq!(state.stage(), PhotoStage::Empty);
        assert!(state.image().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_capture_supersedes_first() {
        let mut state = PhotoAnalysis::new();
        let first = state.capture(&FixedPicker(0));
        let second = state.capture(&FixedPicker(1));

        assert!(!state.complete(first, &LANDMARKS[0]));
        assert_eq!(state.stage(), PhotoStage::Analyzing);

        assert!(state.complete(second, &LANDMARKS[1]));
        assert_eq!(state.stage(), PhotoStage::Identified(&LANDMARKS[1]));
    }

    #[test]
    fn test_failed_upload_stays_empty() {
        let mut state = PhotoAnalysis::new();
        let upload = state.begin_upload();
        let err = PhotoError::Decode {
            path: PathBuf::from("/tmp/notes.txt"),
            reason: "unknown format".to_string(),
        };

        assert_eq!(state.finish_upload(upload, Err(err)), None);
        assert_eq!(state.stage(), PhotoStage::Empty);
        assert!(state.status().unwrap().contains("notes.txt"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_supersedes_slower_upload() {
        let mut state = PhotoAnalysis::new();
        let upload = state.begin_upload();
        let capture = state.capture(&FixedPicker(1));
        assert!(!state.is_loading());

        // The file read finishes after the capture was taken
        assert_eq!(state.finish_upload(upload, Ok(preview())), None);
        match state.image() {
            Some(ImageSource::Captured(url)) => assert_eq!(*url, CAPTURE_URLS[1]),
            other => panic!("unexpected image {:?}", other),
        }

        let record = analyze(DELAY, Arc::new(FixedPicker(1))).await;
        assert!(state.complete(capture, record));
        assert_eq!(state.stage(), PhotoStage::Identified(&LANDMARKS[1]));
    }

    #[test]
    fn test_upload_after_clear_is_ignored() {
        let mut state = PhotoAnalysis::new();
        let upload = state.begin_upload();
        state.clear();

        assert_eq!(state.finish_upload(upload, Ok(preview())), None);
        assert_eq!(state.stage(), PhotoStage::Empty);
        assert!(state.image().is_none());
    }

    #[test]
    fn test_clear_from_identified() {
        let mut state = PhotoAnalysis::new();
        let ticket = state.capture(&FixedPicker(0));
        state.complete(ticket, &LANDMARKS[0]);

        state.clear();
        assert_eq!(state.stage(), PhotoStage::Empty);
        assert!(state.image().is_none());
    }
}
