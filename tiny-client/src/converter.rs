use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use tiny_core::{DataUri, DataUriError, svg_file_name};

use crate::{
    api::{ClientError, ConversionApi},
    download::{DownloadError, DownloadSink},
    state::{ConverterState, SelectedFile, SelectionError},
};

/// Why a submitted conversion did not end in a saved file. The display
/// text is what [`ConverterState::error`] shows.
#[derive(Debug, Error)]
pub enum ConvertFlowError {
    #[error(transparent)]
    Api(#[from] ClientError),

    #[error("server returned an unreadable image: {0}")]
    InvalidImage(#[from] DataUriError),

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Drives the converter form: one selection, one request in flight, and an
/// automatic download when the request succeeds.
#[derive(Debug)]
pub struct Converter<A, D> {
    api: A,
    sink: D,
    state: ConverterState,
}

impl<A: ConversionApi, D: DownloadSink> Converter<A, D> {
    pub fn new(api: A, sink: D) -> Self {
        Self {
            api,
            sink,
            state: ConverterState::new(),
        }
    }

    pub fn state(&self) -> &ConverterState {
        &self.state
    }

    pub fn select(
        &mut self,
        files: Vec<SelectedFile>,
    ) -> Result<(), SelectionError> {
        self.state.select(files)
    }

    /// Uploads the selected file and saves the result as `<name>.svg`.
    ///
    /// Returns `None` without doing anything when there is nothing to
    /// submit. Otherwise the state is settled before returning, whatever
    /// the outcome.
    pub async fn submit(
        &mut self,
    ) -> Option<Result<PathBuf, ConvertFlowError>> {
        let file = self.state.begin()?;

        let outcome = self.run(&file).await;
        match &outcome {
            Ok((path, _)) => {
                info!(
                    file = %file.name,
                    path = %path.display(),
                    "conversion complete"
                );
            }
            Err(err) => {
                let details = match err {
                    ConvertFlowError::Api(api) => api.details(),
                    _ => None,
                };
                error!(
                    file = %file.name,
                    error = %err,
                    details = details.as_deref().unwrap_or("none"),
                    "Error converting image"
                );
            }
        }

        match outcome {
            Ok((path, data_uri)) => {
                self.state.finish::<ConvertFlowError>(Ok(data_uri));
                Some(Ok(path))
            }
            Err(err) => {
                self.state.finish::<String>(Err(err.to_string()));
                Some(Err(err))
            }
        }
    }

    async fn run(
        &self,
        file: &SelectedFile,
    ) -> Result<(PathBuf, String), ConvertFlowError> {
        let data_uri = self.api.convert(file).await?;
        let svg = DataUri::parse(&data_uri)?;
        let path = self
            .sink
            .save(&svg_file_name(&file.name), &svg.data)
            .await?;
        Ok((path, data_uri))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::state::Phase;

    const SVG_URI: &str = "data:image/svg+xml;base64,PHN2Zy8+";

    enum Reply {
        Converted(&'static str),
        Failed,
    }

    struct StubApi {
        reply: Reply,
        calls: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ConversionApi for StubApi {
        async fn convert(
            &self,
            file: &SelectedFile,
        ) -> Result<String, ClientError> {
            self.calls.lock().unwrap().push(file.name.clone());
            match self.reply {
                Reply::Converted(uri) => Ok(uri.to_string()),
                Reply::Failed => Err(ClientError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: None,
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        saved: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl DownloadSink for RecordingSink {
        async fn save(
            &self,
            file_name: &str,
            bytes: &[u8],
        ) -> Result<PathBuf, DownloadError> {
            self.saved
                .lock()
                .unwrap()
                .push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }
    }

    fn photo() -> SelectedFile {
        SelectedFile::new("photo.webp", Some("image/webp".into()), vec![7; 8])
    }

    #[tokio::test]
    async fn success_downloads_svg_under_swapped_name() {
        let mut converter = Converter::new(
            StubApi::new(Reply::Converted(SVG_URI)),
            RecordingSink::default(),
        );
        converter.select(vec![photo()]).unwrap();

        let path = converter.submit().await.unwrap().unwrap();

        assert_eq!(path, PathBuf::from("photo.svg"));
        let saved = converter.sink.saved.lock().unwrap();
        assert_eq!(
            saved.as_slice(),
            &[("photo.svg".to_string(), b"<svg/>".to_vec())]
        );
        assert_eq!(converter.state().phase(), Phase::Done);
        assert_eq!(converter.state().converted_image(), Some(SVG_URI));
        assert_eq!(converter.state().progress(), 100);
    }

    #[tokio::test]
    async fn failure_surfaces_message_and_keeps_selection() {
        let mut converter = Converter::new(
            StubApi::new(Reply::Failed),
            RecordingSink::default(),
        );
        converter.select(vec![photo()]).unwrap();

        let err = converter.submit().await.unwrap().unwrap_err();

        assert!(matches!(err, ConvertFlowError::Api(_)));
        let state = converter.state();
        assert_eq!(state.error(), Some("Failed to convert image"));
        assert!(state.converted_image().is_none());
        assert!(!state.is_loading());
        assert_eq!(state.selected_file(), Some(&photo()));
        assert!(converter.sink.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_without_selection_is_a_no_op() {
        let api = StubApi::new(Reply::Converted(SVG_URI));
        let mut converter = Converter::new(api, RecordingSink::default());

        assert!(converter.submit().await.is_none());
        assert!(converter.api.calls.lock().unwrap().is_empty());
        assert_eq!(converter.state().phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn unreadable_result_is_not_saved() {
        let mut converter = Converter::new(
            StubApi::new(Reply::Converted("not a data uri")),
            RecordingSink::default(),
        );
        converter.select(vec![photo()]).unwrap();

        let err = converter.submit().await.unwrap().unwrap_err();

        assert!(matches!(err, ConvertFlowError::InvalidImage(_)));
        assert_eq!(converter.state().phase(), Phase::Failed);
        assert!(converter.sink.saved.lock().unwrap().is_empty());
    }
}
