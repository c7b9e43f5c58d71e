//! Capability descriptor: the broadcastable messages of a registry.

use super::{CapabilityConfig, CapabilityError, CapabilityResult, DispatchMode, MessageName};
use std::collections::HashMap;

/// Position and mode of one message within a [`CapabilityDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSlot {
    index: usize,
    mode: DispatchMode,
}

impl MessageSlot {
    /// Returns the message's position in the descriptor.
    ///
    /// Required messages come first, followed by optional messages, each in
    /// declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Returns the dispatch mode declared for the message.
    #[must_use]
    pub const fn mode(self) -> DispatchMode {
        self.mode
    }
}

/// The interface a registry broadcasts, partitioned into required and
/// optional messages.
///
/// A descriptor is fixed when its registry is constructed. Every name is
/// unique across both partitions, so the dispatch mode of a message can be
/// derived from its name alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    messages: Vec<(MessageName, DispatchMode)>,
    index: HashMap<String, usize>,
}

impl CapabilityDescriptor {
    /// Starts building a descriptor.
    #[must_use]
    pub fn builder() -> CapabilityDescriptorBuilder {
        CapabilityDescriptorBuilder::default()
    }

    /// Looks up a message by name.
    ///
    /// The name is normalized the way [`MessageName::new`] normalizes
    /// declarations, so a message can be looked up by the exact string it was
    /// declared with. Returns `None` when the descriptor does not declare the
    /// message.
    #[must_use]
    pub fn slot(&self, message: &str) -> Option<MessageSlot> {
        let name = MessageName::new(message).ok()?;
        let index = *self.index.get(name.as_str())?;
        self.messages
            .get(index)
            .map(|&(_, mode)| MessageSlot { index, mode })
    }

    /// Returns the name of the message occupying `slot`.
    #[must_use]
    pub fn name(&self, slot: MessageSlot) -> Option<&MessageName> {
        self.messages.get(slot.index).map(|(name, _)| name)
    }

    /// Returns the dispatch mode of a message, if declared.
    #[must_use]
    pub fn mode_of(&self, message: &str) -> Option<DispatchMode> {
        self.slot(message).map(MessageSlot::mode)
    }

    /// Iterates over every declared message with its mode, in slot order.
    pub fn messages(&self) -> impl Iterator<Item = (&MessageName, DispatchMode)> {
        self.messages.iter().map(|(name, mode)| (name, *mode))
    }

    /// Iterates over the required messages in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &MessageName> {
        self.partition(DispatchMode::Required)
    }

    /// Iterates over the optional messages in declaration order.
    pub fn optional(&self) -> impl Iterator<Item = &MessageName> {
        self.partition(DispatchMode::Optional)
    }

    /// Returns the total number of declared messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when the descriptor declares no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Converts the descriptor back into its configuration record.
    #[must_use]
    pub fn to_config(&self) -> CapabilityConfig {
        CapabilityConfig {
            required_messages: self.required().map(ToString::to_string).collect(),
            optional_messages: self.optional().map(ToString::to_string).collect(),
        }
    }

    fn partition(&self, wanted: DispatchMode) -> impl Iterator<Item = &MessageName> {
        self.messages
            .iter()
            .filter(move |(_, mode)| *mode == wanted)
            .map(|(name, _)| name)
    }
}

impl TryFrom<CapabilityConfig> for CapabilityDescriptor {
    type Error = CapabilityError;

    fn try_from(config: CapabilityConfig) -> Result<Self, Self::Error> {
        let CapabilityConfig {
            required_messages,
            optional_messages,
        } = config;
        Self::builder()
            .required_all(required_messages)
            .optional_all(optional_messages)
            .build()
    }
}

/// Incremental constructor for a [`CapabilityDescriptor`].
///
/// Names are validated when [`build`](Self::build) is called.
#[derive(Debug, Clone, Default)]
pub struct CapabilityDescriptorBuilder {
    required: Vec<String>,
    optional: Vec<String>,
}

impl CapabilityDescriptorBuilder {
    /// Declares a required message.
    #[must_use]
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required.push(message.into());
        self
    }

    /// Declares an optional message.
    #[must_use]
    pub fn optional(mut self, message: impl Into<String>) -> Self {
        self.optional.push(message.into());
        self
    }

    /// Declares several required messages.
    #[must_use]
    pub fn required_all(mut self, messages: impl IntoIterator<Item = String>) -> Self {
        self.required.extend(messages);
        self
    }

    /// Declares several optional messages.
    #[must_use]
    pub fn optional_all(mut self, messages: impl IntoIterator<Item = String>) -> Self {
        self.optional.extend(messages);
        self
    }

    /// Validates the declared names and builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns the [`MessageName`] validation error for a malformed name,
    /// [`CapabilityError::DuplicateMessage`] when a name repeats within one
    /// partition, or [`CapabilityError::AmbiguousMessage`] when a name is
    /// declared both required and optional.
    pub fn build(self) -> CapabilityResult<CapabilityDescriptor> {
        let Self { required, optional } = self;
        let declared = required
            .into_iter()
            .map(|name| (name, DispatchMode::Required))
            .chain(
                optional
                    .into_iter()
                    .map(|name| (name, DispatchMode::Optional)),
            );

        let mut messages: Vec<(MessageName, DispatchMode)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (raw, mode) in declared {
            let name = MessageName::new(raw)?;
            if let Some(&(_, existing)) = index
                .get(name.as_str())
                .and_then(|&position| messages.get(position))
            {
                return Err(if existing == mode {
                    CapabilityError::DuplicateMessage(name.to_string())
                } else {
                    CapabilityError::AmbiguousMessage(name.to_string())
                });
            }
            index.insert(name.to_string(), messages.len());
            messages.push((name, mode));
        }

        Ok(CapabilityDescriptor { messages, index })
    }
}
