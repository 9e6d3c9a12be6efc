//! Subset accumulators feeding the aggregate POMs.
//!
//! Classifiers record members here during the scan; the aggregator reads
//! each subset once, after every directory has been scanned.

use crate::coordinate::{COMPILER_AGGREGATE_GROUP_ID, Coordinate, FRAMEWORK_GROUP_ID};
use crate::rules::SubsetMembership;

/// A tracked aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsetKind {
    /// The small Flex framework: non-AIR small SDK libraries, `playerglobal`
    /// and the configuration bundle.
    FlexFrameworkSmall,
    /// The small AIR framework: every small SDK library and the
    /// configuration bundle.
    AirFrameworkSmall,
    /// Every published compiler tool jar.
    Compiler,
}

impl SubsetKind {
    /// Every subset, in the order the aggregates are published.
    pub const ALL: [Self; 3] = [
        Self::FlexFrameworkSmall,
        Self::AirFrameworkSmall,
        Self::Compiler,
    ];

    /// Return the artifact name of the aggregate POM.
    #[must_use]
    pub const fn aggregate_name(self) -> &'static str {
        match self {
            Self::FlexFrameworkSmall => "flex-framework-small",
            Self::AirFrameworkSmall => "air-framework-small",
            Self::Compiler => "compiler",
        }
    }

    /// Return the group id of the aggregate POM.
    #[must_use]
    pub const fn group_id(self) -> &'static str {
        match self {
            Self::FlexFrameworkSmall | Self::AirFrameworkSmall => FRAMEWORK_GROUP_ID,
            Self::Compiler => COMPILER_AGGREGATE_GROUP_ID,
        }
    }
}

/// Ordered member lists for every [`SubsetKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subsets {
    flex: Vec<Coordinate>,
    air: Vec<Coordinate>,
    compiler: Vec<Coordinate>,
}

impl Subsets {
    /// Append `coordinate` to `kind`, keeping insertion order.
    pub fn add(&mut self, kind: SubsetKind, coordinate: Coordinate) {
        self.members_mut(kind).push(coordinate);
    }

    /// Return the members of `kind` in insertion order.
    #[must_use]
    pub fn members(&self, kind: SubsetKind) -> &[Coordinate] {
        match kind {
            SubsetKind::FlexFrameworkSmall => &self.flex,
            SubsetKind::AirFrameworkSmall => &self.air,
            SubsetKind::Compiler => &self.compiler,
        }
    }

    /// Record a small SDK artifact in the subsets its membership names.
    pub fn record(&mut self, membership: SubsetMembership, coordinate: &Coordinate) {
        match membership {
            SubsetMembership::None => {}
            SubsetMembership::AirOnly => {
                self.add(SubsetKind::AirFrameworkSmall, coordinate.clone());
            }
            SubsetMembership::AirAndFlex => {
                self.add(SubsetKind::AirFrameworkSmall, coordinate.clone());
                self.add(SubsetKind::FlexFrameworkSmall, coordinate.clone());
            }
        }
    }

    const fn members_mut(&mut self, kind: SubsetKind) -> &mut Vec<Coordinate> {
        match kind {
            SubsetKind::FlexFrameworkSmall => &mut self.flex,
            SubsetKind::AirFrameworkSmall => &mut self.air,
            SubsetKind::Compiler => &mut self.compiler,
        }
    }
}
