pub mod prelude {

    use std::{cell::RefCell, collections::VecDeque, time::Duration};

    pub use hktap_core::{
        entities::*,
        gateways::text_generation::*,
        repositories::{Error as RepoError, *},
        usecases::{self, VotePolicy},
    };
    pub use hktap_entities::builders::*;
    pub use hktap_gateways::schedule_store::{JsonScheduleStore, JsonScheduleStores};

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    /// Replays scripted completions.
    pub struct ScriptedGateway {
        responses: RefCell<VecDeque<Result<Completion, TextGenerationError>>>,
        system_prompts: RefCell<Vec<String>>,
    }

    impl ScriptedGateway {
        pub fn new(responses: Vec<Result<Completion, TextGenerationError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                system_prompts: RefCell::new(vec![]),
            }
        }

        pub fn last_system_prompt(&self) -> Option<String> {
            self.system_prompts.borrow().last().cloned()
        }
    }

    impl TextGenerationGateway for ScriptedGateway {
        fn complete(&self, request: &CompletionRequest) -> Result<Completion, TextGenerationError> {
            self.system_prompts
                .borrow_mut()
                .push(request.system_prompt.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Completion::default()))
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub schedule_stores: JsonScheduleStores,
        _schedules_dir: tempfile::TempDir,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            // Tests never wait for a busy connection
            let db_connections =
                sqlite::Connections::init(":memory:", 1, Some(Duration::from_millis(100)))
                    .unwrap();
            hktap_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            let schedules_dir = tempfile::tempdir().unwrap();
            let schedule_stores = JsonScheduleStores::try_new(schedules_dir.path()).unwrap();
            Self {
                db_connections,
                schedule_stores,
                _schedules_dir: schedules_dir,
            }
        }

        pub fn insert_location(&self, location: Location) {
            let db = self.db_connections.exclusive().unwrap();
            db.create_location(&location).unwrap();
        }

        pub fn votes(&self, id: &str) -> u64 {
            let db = self.db_connections.shared().unwrap();
            db.read_votes(id).unwrap()
        }

        pub fn schedule_store(&self, scope: &str) -> JsonScheduleStore {
            self.schedule_stores.scoped(scope).unwrap()
        }
    }
}
