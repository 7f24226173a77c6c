//! URL pattern validation for drea
//!
//! A URL is first matched against a permissive scheme/authority pattern,
//! then against any structural constraints: allowed protocols, ports and
//! domains, whether a fragment, path or query may appear, and length
//! bounds.
//!
//! # Examples
//!
//! ```
//! use drea_url::UrlValidator;
//! use serde_json::json;
//!
//! let validator = UrlValidator::new("http://support.find.com:443/?draz=1");
//! let ok = validator
//!     .verify_pattern_json(&json!({
//!         "allowed_protocols": ["http", "https"],
//!         "allowed_ports": ["443"],
//!         "contain_query": true
//!     }))
//!     .unwrap();
//! assert!(ok);
//! ```

mod checks;
mod constraints;
mod policy;
mod validator;

pub use checks::*;
pub use constraints::*;
pub use policy::*;
pub use validator::*;
