pub mod classifier;
pub mod content;
pub mod error;
pub mod features;
pub mod fetch;
pub mod host;
pub mod lexical;
pub mod parse;
pub mod reputation;

pub use classifier::{Activation, Classifier, DenseModel};
pub use content::PageSignals;
pub use error::{HamusError, Result};
pub use features::{
    ApiKeys, ExtractorConfig, ExtractorConfigBuilder, FEATURE_COUNT, FeatureExtractor, UrlFeatures, extract_features,
};
pub use fetch::{FetchConfig, fetch_url};
pub use host::UrlParts;
pub use parse::Document;
pub use reputation::{AGE_UNRECORDED, INDEXED, LOOKUP_UNAVAILABLE, LookupConfig, NOT_INDEXED};
