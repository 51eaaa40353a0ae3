pub mod annotator;
pub mod classifier;
pub mod config;
pub mod detection;
pub mod engine;
pub mod history;
pub mod lexicon;
pub mod normalization;
pub mod reasons;
pub mod remote;

pub use annotator::{annotate, characterize, DisplayStyle, WordAnnotation};
pub use classifier::{classify, Status, Verdict};
pub use config::Config;
pub use detection::{detect_keywords, detect_urls, Evidence};
pub use engine::{Analysis, Analyzer, Assessment, AssessmentSource};
pub use history::{Classification, History};
pub use lexicon::Lexicon;
pub use normalization::normalize;
pub use reasons::generate_reasons;
pub use remote::{
    assess_configured, assess_remote, setup_scorer, RemoteReport, RemoteScorer, ScorerSetup,
};
