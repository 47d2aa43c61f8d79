pub mod analyzer;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod formatters;
pub mod keywords;
pub mod metadata;
pub mod parse;
pub mod phrases;
pub mod recommend;
pub mod render;
pub mod report;
pub mod sanitize;
pub mod scorer;
pub mod scoring;
pub mod sections;
pub mod textstats;

pub use analyzer::{Analyzer, InputType};
pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, Thresholds};
pub use error::{AnalysisFailure, Result, SeoscopeError};
#[doc(hidden)]
pub use extract::{ExtractConfig, ExtractedContent};
pub use extract::{extract_content, main_text, paragraph_text};
pub use fetch::{FetchConfig, fetch_file, fetch_stdin};
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, convert_to_json, convert_to_text};
pub use keywords::{TfidfConfig, top_frequency_keywords, top_tfidf_keywords};
pub use metadata::PageMetadata;
pub use parse::Document;
pub use phrases::{Lexicon, PhraseChunker};
pub use recommend::{Rule, recommendations};
pub use render::{RenderConfig, ReportRenderer};
pub use report::{AnalysisResult, SectionResult, Source};
pub use sanitize::sanitize;
pub use scorer::{TextScore, TextScorer};
#[doc(hidden)]
pub use scoring::{ScoreConfig, ScoreResult, calculate_score};
pub use sections::{DetectedSection, detect_sections};
pub use textstats::{flesch_reading_ease, word_count};
