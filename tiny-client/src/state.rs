//! Local state of a single converter form.

use std::fmt;

use thiserror::Error;

const WEBP_MIME: &str = "image/webp";
const WEBP_EXTENSION: &str = ".webp";

/// A file picked for upload, held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    /// Accepts `image/webp` or a `.webp` name, either one is enough.
    pub fn is_webp(&self) -> bool {
        self.content_type.as_deref() == Some(WEBP_MIME)
            || self.name.to_ascii_lowercase().ends_with(WEBP_EXTENSION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no file selected")]
    NoFile,
    #[error("only one file can be converted at a time ({0} given)")]
    TooManyFiles(usize),
    #[error("{name} is not a WEBP image")]
    NotWebp { name: String },
    #[error("a conversion is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected,
    Converting,
    Done,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    selected_file: Option<SelectedFile>,
    is_loading: bool,
    progress: u8,
    error: Option<String>,
    converted_image: Option<String>,
}

impl ConverterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// 0 when a conversion starts, 100 once it has settled either way.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last successful result as a `data:image/svg+xml;base64,...` URI.
    pub fn converted_image(&self) -> Option<&str> {
        self.converted_image.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Converting
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.converted_image.is_some() {
            Phase::Done
        } else if self.selected_file.is_some() {
            Phase::Selected
        } else {
            Phase::Idle
        }
    }

    /// Replaces the selection. Exactly one WEBP file is accepted; on
    /// rejection the state is left as it was.
    pub fn select(
        &mut self,
        files: Vec<SelectedFile>,
    ) -> Result<(), SelectionError> {
        if self.is_loading {
            return Err(SelectionError::Busy);
        }

        let mut files = files.into_iter();
        let file = match (files.next(), files.len()) {
            (None, _) => return Err(SelectionError::NoFile),
            (Some(file), 0) => file,
            (Some(_), rest) => {
                return Err(SelectionError::TooManyFiles(rest + 1));
            }
        };

        if !file.is_webp() {
            return Err(SelectionError::NotWebp { name: file.name });
        }

        self.selected_file = Some(file);
        self.converted_image = None;
        self.error = None;
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    /// Starts a conversion and returns the file to upload, or `None` when
    /// nothing can be submitted.
    pub fn begin(&mut self) -> Option<SelectedFile> {
        if !self.can_submit() {
            return None;
        }

        self.is_loading = true;
        self.progress = 0;
        self.error = None;
        self.selected_file.clone()
    }

    /// Settles the in-flight conversion. Loading is cleared and progress set
    /// to 100 whatever the outcome; the selection is kept.
    pub fn finish<E: fmt::Display>(&mut self, result: Result<String, E>) {
        match result {
            Ok(data_uri) => {
                self.converted_image = Some(data_uri);
                self.error = None;
            }
            Err(err) => {
                self.converted_image = None;
                self.error = Some(err.to_string());
            }
        }

        self.is_loading = false;
        self.progress = 100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn webp(name: &str) -> SelectedFile {
        SelectedFile::new(name, Some(WEBP_MIME.into()), vec![1, 2, 3])
    }

    #[test]
    fn starts_idle_and_cannot_submit() {
        let mut state = ConverterState::new();
        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.can_submit());
        assert!(state.begin().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn selecting_clears_previous_outcome() {
        let mut state = ConverterState::new();
        state.select(vec![webp("a.webp")]).unwrap();
        state.begin().unwrap();
        state.finish::<String>(Err("Failed to convert image".into()));
        assert_eq!(state.phase(), Phase::Failed);

        state.select(vec![webp("b.webp")]).unwrap();
        assert_eq!(state.phase(), Phase::Selected);
        assert!(state.error().is_none());
        assert!(state.converted_image().is_none());
        assert_eq!(state.selected_file().unwrap().name, "b.webp");
    }

    #[test]
    fn rejects_anything_but_one_webp() {
        let mut state = ConverterState::new();
        state.select(vec![webp("keep.webp")]).unwrap();

        assert_eq!(state.select(Vec::new()), Err(SelectionError::NoFile));
        assert_eq!(
            state.select(vec![webp("a.webp"), webp("b.webp")]),
            Err(SelectionError::TooManyFiles(2))
        );
        assert_eq!(
            state.select(vec![SelectedFile::new(
                "photo.png",
                Some("image/png".into()),
                vec![0],
            )]),
            Err(SelectionError::NotWebp {
                name: "photo.png".into()
            })
        );
        assert_eq!(state.selected_file().unwrap().name, "keep.webp");
    }

    #[test]
    fn webp_is_recognised_by_name_or_mime() {
        assert!(SelectedFile::new("PHOTO.WEBP", None, vec![]).is_webp());
        assert!(
            SelectedFile::new("upload", Some(WEBP_MIME.into()), vec![])
                .is_webp()
        );
        assert!(!SelectedFile::new("photo.jpg", None, vec![]).is_webp());
    }

    #[test]
    fn begin_resets_progress_and_blocks_resubmit() {
        let mut state = ConverterState::new();
        state.select(vec![webp("a.webp")]).unwrap();

        let file = state.begin().unwrap();
        assert_eq!(file.name, "a.webp");
        assert!(state.is_loading());
        assert_eq!(state.progress(), 0);
        assert_eq!(state.phase(), Phase::Converting);
        assert!(!state.can_submit());
        assert!(state.begin().is_none());
        assert_eq!(
            state.select(vec![webp("b.webp")]),
            Err(SelectionError::Busy)
        );
    }

    #[test]
    fn finish_always_clears_loading() {
        let mut state = ConverterState::new();
        state.select(vec![webp("a.webp")]).unwrap();

        state.begin().unwrap();
        state.finish::<String>(Ok("data:image/svg+xml;base64,AA==".into()));
        assert!(!state.is_loading());
        assert_eq!(state.progress(), 100);
        assert_eq!(state.phase(), Phase::Done);

        state.begin().unwrap();
        state.finish::<String>(Err("Failed to convert image".into()));
        assert!(!state.is_loading());
        assert_eq!(state.progress(), 100);
        assert_eq!(state.error(), Some("Failed to convert image"));
        assert!(state.converted_image().is_none());
        assert_eq!(state.selected_file().unwrap().name, "a.webp");
    }
}
