use crate::{FileId, HistoryTrigger, LocalFile, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadProfile,
    LoadHistory { trigger: HistoryTrigger },
    DecodePreview { file_id: FileId, file: LocalFile },
    SubmitPrediction { submission_id: SubmissionId, file: LocalFile },
    Logout,
}
