pub use hktap_application::prelude as flows;
pub use hktap_core::usecases;

pub mod prelude {
    pub use hktap_core::{
        entities::*,
        repositories::{Error as RepoError, *},
    };
}
