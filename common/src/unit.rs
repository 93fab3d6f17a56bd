//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;

/// Marker type describing an entity expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// Marker type describing a document emission.
#[derive(Clone, Copy, Debug)]
pub struct Emission;

/// Marker type describing an entity start.
#[derive(Clone, Copy, Debug)]
pub struct Start;

/// Marker type describing a sale opening.
#[derive(Clone, Copy, Debug)]
pub struct SaleStart;

/// Marker type describing a sale closing.
#[derive(Clone, Copy, Debug)]
pub struct SaleEnd;
