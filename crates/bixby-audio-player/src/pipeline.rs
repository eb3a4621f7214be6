//! Staged middleware pipeline for one request/response turn.
//!
//! Plugins register handlers on named stages; [`Pipeline::run`] executes every
//! stage in declaration order against a fresh [`Capsule`].

use std::fmt;
use std::str::FromStr;

use crate::request::BixbyRequest;
use crate::response::BixbyResponse;
use crate::session::{Capsule, Session};

/// Extension points, in run order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Init,
    Request,
    Type,
    Session,
    Nlu,
    Inputs,
    Handler,
    Output,
    Response,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Init,
        Stage::Request,
        Stage::Type,
        Stage::Session,
        Stage::Nlu,
        Stage::Inputs,
        Stage::Handler,
        Stage::Output,
        Stage::Response,
    ];

    /// Registration name, e.g. `$type`.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Init => "$init",
            Stage::Request => "$request",
            Stage::Type => "$type",
            Stage::Session => "$session",
            Stage::Nlu => "$nlu",
            Stage::Inputs => "$inputs",
            Stage::Handler => "$handler",
            Stage::Output => "$output",
            Stage::Response => "$response",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a stage name does not match any [`Stage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStage(pub String);

impl fmt::Display for UnknownStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown middleware stage {:?}", self.0)
    }
}

impl std::error::Error for UnknownStage {}

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

type Handler = Box<dyn Fn(&mut Capsule<'_>) + Send + Sync>;

/// Ordered handlers registered on one stage.
pub struct Middleware {
    stage: Stage,
    handlers: Vec<Handler>,
}

impl Middleware {
    fn new(stage: Stage) -> Self {
        Self {
            stage,
            handlers: Vec::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Append a handler; handlers run in registration order.
    pub fn use_fn<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&mut Capsule<'_>) + Send + Sync + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn run(&self, capsule: &mut Capsule<'_>) {
        for handler in &self.handlers {
            handler(capsule);
        }
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("stage", &self.stage)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// A component that hooks into one or more pipeline stages.
pub trait Plugin {
    fn name(&self) -> &'static str;
    fn install(&self, pipeline: &mut Pipeline);
}

#[derive(Debug)]
pub struct Pipeline {
    stages: Vec<Middleware>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            stages: Stage::ALL.into_iter().map(Middleware::new).collect(),
        }
    }

    pub fn middleware(&mut self, stage: Stage) -> &mut Middleware {
        &mut self.stages[stage.index()]
    }

    /// Look up a stage by its `$name`.
    pub fn middleware_by_name(&mut self, name: &str) -> Result<&mut Middleware, UnknownStage> {
        let stage = name.parse::<Stage>()?;
        Ok(self.middleware(stage))
    }

    pub fn install(&mut self, plugin: &dyn Plugin) -> &mut Self {
        plugin.install(self);
        tracing::info!(plugin = plugin.name(), "installed plugin");
        self
    }

    /// Process one request against `session` and return the built response.
    pub fn run(&self, session: &mut Session, request: BixbyRequest) -> Option<BixbyResponse> {
        let span = tracing::debug_span!("turn", session_id = %session.id);
        let _enter = span.enter();

        let mut capsule = Capsule::new(session, request);
        for middleware in &self.stages {
            if middleware.is_empty() {
                continue;
            }
            tracing::trace!(
                stage = %middleware.stage,
                handlers = middleware.len(),
                "running stage"
            );
            middleware.run(&mut capsule);
        }
        capsule.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::request_type::{RequestKind, RequestType};

    #[test]
    fn stage_names_roundtrip() {
        for stage in Stage::ALL {
            assert_eq!(stage.name().parse::<Stage>(), Ok(stage));
        }
        assert_eq!(
            "$unknown".parse::<Stage>(),
            Err(UnknownStage("$unknown".to_string()))
        );
    }

    #[test]
    fn stages_run_in_declared_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = Pipeline::new();
        for stage in [Stage::Output, Stage::Type, Stage::Session] {
            let seen = seen.clone();
            pipeline.middleware(stage).use_fn(move |_| {
                seen.lock().unwrap().push(stage);
            });
        }
        pipeline.run(&mut Session::new("s"), BixbyRequest::default());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Stage::Type, Stage::Session, Stage::Output]
        );
    }

    #[test]
    fn handlers_on_one_stage_run_in_registration_order() {
        let mut pipeline = Pipeline::new();
        pipeline
            .middleware_by_name("$handler")
            .unwrap()
            .use_fn(|capsule| {
                capsule.audio_player().set_title("first");
            })
            .use_fn(|capsule| {
                let title = capsule.audio_player().audio_item.title.clone();
                capsule.audio_player().set_title(format!("{title} then second"));
            });
        let mut session = Session::new("s");
        pipeline.run(&mut session, BixbyRequest::default());
        assert_eq!(
            session.audio_player().unwrap().audio_item.title,
            "first then second"
        );
    }

    #[test]
    fn unknown_stage_name_is_rejected() {
        let mut pipeline = Pipeline::new();
        let err = pipeline.middleware_by_name("type").unwrap_err();
        assert_eq!(err.to_string(), "unknown middleware stage \"type\"");
    }

    #[test]
    fn run_returns_none_without_response() {
        let mut pipeline = Pipeline::new();
        pipeline
            .middleware(Stage::Type)
            .use_fn(|capsule| capsule.request_type = Some(RequestType::new(RequestKind::Intent)));
        let response = pipeline.run(&mut Session::new("s"), BixbyRequest::default());
        assert!(response.is_none());
    }
}
