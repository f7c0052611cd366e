//! Writing-style domain: samples, weighting, merging, confidence, the
//! profile aggregate, and incremental refinement.

pub mod confidence;
pub mod merge;
pub mod mergers;
pub mod profile;
pub mod quality;
pub mod refine;
pub mod sample;
pub mod weights;
pub mod writing_style;

pub use confidence::{merged_confidence, CONFIDENCE_CAP, FALLBACK_CONFIDENCE};
pub use merge::{merge_writing_styles, MergeOutcome};
pub use mergers::{AttributeAttribution, SourceContribution};
pub use profile::{LearningMetadata, StyleProfile, CONVERSATION_WORDS_KEY};
pub use quality::QualityFlags;
pub use refine::{conversation_blob, refine_profile, AttributeChange, DeltaReport};
pub use sample::{SourceSample, SourceType, WeightedSource};
pub use weights::{normalize_weights, source_weight};
pub use writing_style::{
    Attribute, Formality, SentenceLength, Tone, WritingStyle, AVOIDANCE_CAP, VOCABULARY_CAP,
};
