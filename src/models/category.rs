//! Category enums used to filter resource lists

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgTypeInfo, PgValueRef};
use sqlx::{Decode, Postgres, Type};

/// A closed classification set stored as text
pub trait Category: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    fn all() -> &'static [Self];

    /// Value stored in the database and used in query strings
    fn as_str(&self) -> &'static str;

    /// Label shown on filter chips
    fn label(&self) -> &'static str;

    /// Parse a stored value or a display label, ignoring case and surrounding space
    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::all().iter().copied().find(|c| {
            c.as_str().eq_ignore_ascii_case(value) || c.label().eq_ignore_ascii_case(value)
        })
    }
}

/// Event themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "TECHNOVA")]
    Technova,
    #[serde(rename = "PIXEL FUSION")]
    PixelFusion,
    #[serde(rename = "BRAIN MASTERS")]
    BrainMasters,
    #[serde(rename = "SPORTS AND CULTURALS")]
    SportsAndCulturals,
}

impl Category for EventCategory {
    fn all() -> &'static [Self] {
        &[
            EventCategory::Technova,
            EventCategory::PixelFusion,
            EventCategory::BrainMasters,
            EventCategory::SportsAndCulturals,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Technova => "TECHNOVA",
            EventCategory::PixelFusion => "PIXEL FUSION",
            EventCategory::BrainMasters => "BRAIN MASTERS",
            EventCategory::SportsAndCulturals => "SPORTS AND CULTURALS",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EventCategory::Technova => "Technova",
            EventCategory::PixelFusion => "Pixel Fusion",
            EventCategory::BrainMasters => "Brain Masters",
            EventCategory::SportsAndCulturals => "Sports and Culturals",
        }
    }
}

/// Team roster tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamCategory {
    Faculty,
    HeadCoordinator,
    Member,
}

impl Category for TeamCategory {
    fn all() -> &'static [Self] {
        &[
            TeamCategory::Faculty,
            TeamCategory::HeadCoordinator,
            TeamCategory::Member,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            TeamCategory::Faculty => "faculty",
            TeamCategory::HeadCoordinator => "head_coordinator",
            TeamCategory::Member => "member",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TeamCategory::Faculty => "Faculty",
            TeamCategory::HeadCoordinator => "Head Coordinators",
            TeamCategory::Member => "Club Members",
        }
    }
}

macro_rules! impl_text_column {
    ($ty:ty) => {
        impl Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $ty {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let raw = <&str as Decode<Postgres>>::decode(value)?;
                <$ty as Category>::parse(raw)
                    .ok_or_else(|| format!("unknown {} value: {}", stringify!($ty), raw).into())
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_text_column!(EventCategory);
impl_text_column!(TeamCategory);
