//! Static model metadata: which fields are relations and where they lead.

use crate::value::Record;

/// Shape of a model field as far as relation traversal is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain stored value
    Scalar,
    /// Many-to-one relation held on this model
    ForeignKey { target: &'static str },
    /// One-to-one relation held on this model
    OneToOne { target: &'static str },
    /// Reverse side of a foreign key on another model
    OneToMany { target: &'static str },
    ManyToMany { target: &'static str },
}

impl FieldKind {
    /// True for relations that resolve to a single object and can be joined
    /// into the row fetch.
    #[inline]
    pub const fn is_to_one(&self) -> bool {
        matches!(self, Self::ForeignKey { .. } | Self::OneToOne { .. })
    }

    #[inline]
    pub const fn is_relation(&self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// Name of the related model, if this field is a relation.
    pub const fn target(&self) -> Option<&'static str> {
        match self {
            Self::Scalar => None,
            Self::ForeignKey { target }
            | Self::OneToOne { target }
            | Self::OneToMany { target }
            | Self::ManyToMany { target } => Some(*target),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub const fn scalar(name: &'static str) -> Self {
        Self::new(name, FieldKind::Scalar)
    }

    pub const fn foreign_key(name: &'static str, target: &'static str) -> Self {
        Self::new(name, FieldKind::ForeignKey { target })
    }
}

/// Runtime field metadata for the model behind a change list. Field order
/// follows declaration order.
#[derive(Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl ModelDescriptor {
    pub const fn new(name: &'static str, fields: &'static [FieldDescriptor]) -> Self {
        Self { name, fields }
    }

    /// Looks up a field declared directly on this model.
    pub fn get_field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Fields that can be eagerly loaded with a join.
    pub fn to_one_relations(&self) -> impl Iterator<Item = &'static FieldDescriptor> {
        self.fields.iter().filter(|field| field.kind.is_to_one())
    }
}

/// A record type with static model metadata, implemented by `#[derive(Record)]`.
pub trait Model: Record {
    fn descriptor() -> &'static ModelDescriptor;
}
