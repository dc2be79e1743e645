pub mod answer_flattener;
pub mod artifact_writer;
pub mod grouper;
pub mod patterns;
pub mod segmenter;
pub mod type_classifier;
pub mod zone_splitter;

pub use answer_flattener::AnswerFlattener;
pub use artifact_writer::ArtifactWriter;
pub use grouper::build_blocks;
pub use segmenter::{Fragment, SegmentStop, Segmenter, Segments};
pub use type_classifier::{classify, classify_with_reasons, Classification};
pub use zone_splitter::{split_zones, Zones};
