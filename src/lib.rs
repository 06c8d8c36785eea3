pub mod encoder;
pub mod error;
pub mod field;
pub mod isa;
pub mod memory;
pub mod pattern;
pub mod run;
pub mod translate;
pub mod watch;

pub use error::{AllocError, ConfigError, EncodingError, Error, ErrorKind, OverlapError, Result};
pub use field::{Field, FieldSet, FieldValues};
pub use isa::{InstructionMatcher, InstructionSet};
pub use memory::LocationAllocator;
pub use run::{run, sanitize_ascii, ProfileConfig, RunConfig, RunSummary};
pub use translate::{OutputLine, Profile, Translation, Translator};
