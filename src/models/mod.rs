pub mod diagnostics;
pub mod group;
pub mod loaders;
pub mod question;

pub use diagnostics::{Diagnostics, QuestionDiagnostic, SegmentOffsets, Truncation};
pub use group::{Block, GroupDefinition, GroupFile, Layout};
pub use loaders::{load_extraction, load_group_file, parse_group_file};
pub use question::{AnswerItem, ExtractionArtifact, Question, QuestionType, RawSource, Statement};
