use super::{fmt_model, ApiModel};
use serde::de::{self, DeserializeOwned, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use strum::VariantNames;
use strum_macros::{Display, EnumString, IntoStaticStr, VariantNames};

/// Common behaviour of the integer-coded state enums the orchestrator puts on the wire.
///
/// The server encodes a state as its integer code; the variant name is accepted as well so
/// that hand-written payloads and CLI input stay readable.
pub trait StateKind: Copy + FromStr + VariantNames + fmt::Display + 'static {
    /// Name of the `State<Self>` model as declared by the API schema
    const STATE_MODEL_NAME: &'static str;

    fn code(self) -> u8;

    fn from_code(code: u64) -> Option<Self>;
}

/// Lifecycle of an execution as observed by the compute node
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ExecutionStateType {
    #[default]
    Undefined = 0,
    New = 1,
    AskForBid = 2,
    AskForBidAccepted = 3,
    AskForBidRejected = 4,
    BidAccepted = 5,
    BidRejected = 6,
    Completed = 7,
    Failed = 8,
    Cancelled = 9,
}

impl ExecutionStateType {
    /// Returns true once the execution can no longer change state.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionStateType::BidRejected
                | ExecutionStateType::Completed
                | ExecutionStateType::Failed
                | ExecutionStateType::Cancelled
        )
    }
}

impl StateKind for ExecutionStateType {
    const STATE_MODEL_NAME: &'static str = "StateExecutionStateType";

    fn code(self) -> u8 {
        self as u8
    }

    fn from_code(code: u64) -> Option<Self> {
        let state = match code {
            0 => ExecutionStateType::Undefined,
            1 => ExecutionStateType::New,
            2 => ExecutionStateType::AskForBid,
            3 => ExecutionStateType::AskForBidAccepted,
            4 => ExecutionStateType::AskForBidRejected,
            5 => ExecutionStateType::BidAccepted,
            6 => ExecutionStateType::BidRejected,
            7 => ExecutionStateType::Completed,
            8 => ExecutionStateType::Failed,
            9 => ExecutionStateType::Cancelled,
            _ => return None,
        };
        Some(state)
    }
}

/// State the orchestrator wants an execution to reach
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, VariantNames,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum ExecutionDesiredStateType {
    #[default]
    Pending = 0,
    Running = 1,
    Stopped = 2,
}

impl StateKind for ExecutionDesiredStateType {
    const STATE_MODEL_NAME: &'static str = "StateExecutionDesiredStateType";

    fn code(self) -> u8 {
        self as u8
    }

    fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(ExecutionDesiredStateType::Pending),
            1 => Some(ExecutionDesiredStateType::Running),
            2 => Some(ExecutionDesiredStateType::Stopped),
            _ => None,
        }
    }
}

struct StateKindVisitor<T>(PhantomData<T>);

impl<'de, T: StateKind> Visitor<'de> for StateKindVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a state code or one of {:?}", T::VARIANTS)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<T, E> {
        T::from_code(value).ok_or_else(|| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<T, E> {
        if value < 0 {
            return Err(E::invalid_value(Unexpected::Signed(value), &self));
        }
        self.visit_u64(value as u64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        T::from_str(value).map_err(|_| E::unknown_variant(value, T::VARIANTS))
    }
}

macro_rules! state_kind_serde {
    ($kind:ty) => {
        impl Serialize for $kind {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $kind {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(StateKindVisitor(PhantomData))
            }
        }
    };
}

state_kind_serde!(ExecutionStateType);
state_kind_serde!(ExecutionDesiredStateType);

/// A state value together with a human readable message describing it
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct State<T> {
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(rename = "StateType", skip_serializing_if = "Option::is_none")]
    state_type: Option<T>,
}

/// Compute state of an execution
pub type ExecutionStateRecord = State<ExecutionStateType>;

/// Desired state of an execution
pub type ExecutionDesiredState = State<ExecutionDesiredStateType>;

impl<T: StateKind> State<T> {
    pub fn new(state_type: T) -> Self {
        State {
            message: None,
            state_type: Some(state_type),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn state_type(&self) -> Option<T> {
        self.state_type
    }
}

impl<T> ApiModel for State<T>
where
    T: StateKind + Serialize + DeserializeOwned + PartialEq,
{
    const MODEL_NAME: &'static str = T::STATE_MODEL_NAME;
    const ATTRIBUTE_MAP: &'static [(&'static str, &'static str)] =
        &[("message", "Message"), ("state_type", "StateType")];
}

impl<T> fmt::Display for State<T>
where
    T: StateKind + Serialize + DeserializeOwned + PartialEq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_model(self, f)
    }
}
