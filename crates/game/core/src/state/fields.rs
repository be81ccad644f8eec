//! Closed enumerations of the observable fields of each domain object.
//!
//! A notification carries exactly one of these values. The string token of
//! each variant (`as_ref()` / `Display`) matches the property name used by
//! the server protocol, e.g. `maxHp` or `targetId`.

macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$variant_meta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            Hash,
            strum::Display,
            strum::AsRefStr,
            strum::EnumIter,
        )]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[strum(serialize_all = "camelCase")]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }
    };
}

field_enum! {
    /// Identity-level fields of a [`Creature`](crate::Creature).
    CreatureField {
        Name,
        Title,
        Kind,
        AggroRadius,
    }
}

field_enum! {
    /// Fields of a [`Transform`](crate::Transform) other than its nested position.
    TransformField {
        Direction,
        Velocity,
    }
}

field_enum! {
    /// Components of a [`WorldPosition`](crate::WorldPosition).
    PositionField {
        X,
        Y,
        Z,
    }
}

field_enum! {
    /// Fields of [`VitalStats`](crate::VitalStats).
    VitalStatsField {
        Hp,
        MaxHp,
        Mp,
        MaxMp,
    }
}

field_enum! {
    /// Identity-level fields of the [`Hero`](crate::Hero).
    HeroField {
        Name,
        TargetId,
    }
}
