//! Geography reference tree: department, province and district.

pub mod department {
    //! [`Department`] definitions.

    use derive_more::{AsRef, Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// Top-level administrative division.
    #[derive(Clone, Debug)]
    pub struct Department {
        /// ID of this [`Department`].
        pub id: Id,

        /// Name of this [`Department`].
        pub name: Name,
    }

    /// ID of a [`Department`].
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);

    /// Name of a [`Department`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    #[cfg_attr(
        feature = "postgres",
        derive(FromSql, ToSql),
        postgres(transparent)
    )]
    pub struct Name(pub(crate) String);
}

pub mod province {
    //! [`Province`] definitions.

    use derive_more::{AsRef, Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use super::department;

    /// Administrative division of a [`Department`].
    ///
    /// [`Department`]: super::department::Department
    #[derive(Clone, Debug)]
    pub struct Province {
        /// ID of this [`Province`].
        pub id: Id,

        /// ID of the [`Department`] this [`Province`] belongs to.
        ///
        /// [`Department`]: super::department::Department
        pub department_id: department::Id,

        /// Name of this [`Province`].
        pub name: Name,
    }

    /// ID of a [`Province`].
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);

    /// Name of a [`Province`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    #[cfg_attr(
        feature = "postgres",
        derive(FromSql, ToSql),
        postgres(transparent)
    )]
    pub struct Name(pub(crate) String);
}

pub mod district {
    //! [`District`] definitions.

    use derive_more::{AsRef, Display, From, FromStr, Into};
    #[cfg(feature = "postgres")]
    use postgres_types::{FromSql, ToSql};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use super::province;

    /// Administrative division of a [`Province`], referenced by users and
    /// venues.
    ///
    /// [`Province`]: super::province::Province
    #[derive(Clone, Debug)]
    pub struct District {
        /// ID of this [`District`].
        pub id: Id,

        /// ID of the [`Province`] this [`District`] belongs to.
        ///
        /// [`Province`]: super::province::Province
        pub province_id: province::Id,

        /// Name of this [`District`].
        pub name: Name,
    }

    /// ID of a [`District`].
    #[derive(
        Clone,
        Copy,
        Debug,
        Deserialize,
        Display,
        Eq,
        From,
        FromStr,
        Hash,
        Into,
        PartialEq,
        Serialize,
    )]
    #[cfg_attr(
        feature = "postgres",
        derive(ToSql, FromSql),
        postgres(transparent)
    )]
    pub struct Id(Uuid);

    /// Name of a [`District`].
    #[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
    #[as_ref(str, String)]
    #[cfg_attr(
        feature = "postgres",
        derive(FromSql, ToSql),
        postgres(transparent)
    )]
    pub struct Name(pub(crate) String);
}

pub use self::{
    department::Department, district::District, province::Province,
};
