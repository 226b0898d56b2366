//! model::framework — sampling-framework bookkeeping for fitted models.
//!
//! Purpose
//! -------
//! Carry the domain and unit bookkeeping of the survey behind a fitted
//! small-area model: how many domains were sampled, how many population
//! domains were never observed, unit counts, and the raw per-unit
//! domain-membership vectors from which per-domain sample sizes derive.
//!
//! Key behaviors
//! -------------
//! - Derive domain and unit counts from the raw membership vectors at
//!   construction time, so downstream summaries read cached counts.
//! - Compute per-domain sample sizes in first-appearance order for the
//!   direct-estimation summary.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample membership vector has one entry per sampled unit; the
//!   population membership vector (when present, e.g. for unit-level EBP
//!   models) has one entry per population unit.
//! - Domain identity is by string equality; ordering of derived per-domain
//!   statistics follows first appearance in the sample vector.
//! - Area-level models (FH) typically have no population unit vector; the
//!   unobserved-domain count then comes from the explicit domain list.
//!
//! Conventions
//! -----------
//! - This is bookkeeping, not estimation: nothing here touches estimates
//!   or MSEs.
//!
//! Downstream usage
//! ----------------
//! - `summary::direct` summarizes [`SampleFramework::domain_sample_sizes`];
//!   all summary variants surface the domain/unit counts.
//!
//! Testing notes
//! -------------
//! - Unit tests cover count derivation with and without a population
//!   vector and the ordering of per-domain sample sizes.

/// SampleFramework — domain and unit bookkeeping behind a fitted model.
///
/// Purpose
/// -------
/// Hold the raw domain-membership vectors of the survey sample (and, for
/// unit-level models, the population) together with the counts derived
/// from them.
///
/// Parameters
/// ----------
/// Constructed via [`SampleFramework::new`]:
/// - `sample_membership`: `Vec<String>`
///   Per-unit domain identifiers of the sampled units.
/// - `population_membership`: `Option<Vec<String>>`
///   Per-unit domain identifiers of the population (unit-level models), or
///   `None` for area-level models.
/// - `population_domains`: `Option<Vec<String>>`
///   Explicit list of all population domains for area-level models where
///   no unit-level population vector exists; ignored when
///   `population_membership` is present.
///
/// Fields
/// ------
/// - `n_domains_sampled`: number of distinct domains with sampled units.
/// - `n_domains_unobserved`: number of population domains without sampled
///   units (0 when no population information was supplied).
/// - `n_units_sampled`: number of sampled units.
/// - `n_units_population`: number of population units, when applicable.
///
/// Invariants
/// ----------
/// - Counts are derived once at construction and never recomputed.
/// - `n_domains_unobserved` counts population domains absent from the
///   sample, never the reverse.
#[derive(Debug, Clone)]
pub struct SampleFramework {
    n_domains_sampled: usize,
    n_domains_unobserved: usize,
    n_units_sampled: usize,
    n_units_population: Option<usize>,
    sample_membership: Vec<String>,
}

impl SampleFramework {
    /// Build the framework record, deriving all counts from the raw
    /// membership vectors.
    ///
    /// Parameters
    /// ----------
    /// - `sample_membership`: `Vec<String>`
    ///   Per-unit domain identifiers of the sampled units.
    /// - `population_membership`: `Option<Vec<String>>`
    ///   Per-unit domain identifiers of the population, or `None`.
    /// - `population_domains`: `Option<Vec<String>>`
    ///   Explicit population domain list for area-level models; used only
    ///   when `population_membership` is `None`.
    ///
    /// Returns
    /// -------
    /// `SampleFramework`
    ///   With unit counts taken from vector lengths and domain counts from
    ///   distinct identifiers.
    ///
    /// Notes
    /// -----
    /// - Construction is total: an empty sample vector simply yields zero
    ///   counts (the estimate tables enforce non-emptiness where it
    ///   matters).
    pub fn new(
        sample_membership: Vec<String>, population_membership: Option<Vec<String>>,
        population_domains: Option<Vec<String>>,
    ) -> Self {
        let n_units_sampled = sample_membership.len();
        let n_units_population = population_membership.as_ref().map(Vec::len);

        let sampled = distinct(&sample_membership);
        let population = match (&population_membership, &population_domains) {
            (Some(units), _) => distinct(units),
            (None, Some(domains)) => distinct(domains),
            (None, None) => Vec::new(),
        };
        let n_domains_unobserved = population.iter().filter(|d| !sampled.contains(*d)).count();

        SampleFramework {
            n_domains_sampled: sampled.len(),
            n_domains_unobserved,
            n_units_sampled,
            n_units_population,
            sample_membership,
        }
    }

    /// Number of distinct domains with at least one sampled unit.
    pub fn n_domains_sampled(&self) -> usize {
        self.n_domains_sampled
    }

    /// Number of population domains without any sampled unit.
    pub fn n_domains_unobserved(&self) -> usize {
        self.n_domains_unobserved
    }

    /// Number of sampled units.
    pub fn n_units_sampled(&self) -> usize {
        self.n_units_sampled
    }

    /// Number of population units, when population data was supplied.
    pub fn n_units_population(&self) -> Option<usize> {
        self.n_units_population
    }

    /// Raw per-unit domain membership of the sample.
    pub fn sample_membership(&self) -> &[String] {
        &self.sample_membership
    }

    /// Per-domain sample sizes in first-appearance order.
    ///
    /// Returns
    /// -------
    /// `Vec<usize>`
    ///   One entry per sampled domain, counting its units; ordering follows
    ///   the first appearance of each domain in the membership vector.
    pub fn domain_sample_sizes(&self) -> Vec<usize> {
        let mut order: Vec<&String> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        for domain in &self.sample_membership {
            match order.iter().position(|d| *d == domain) {
                Some(i) => counts[i] += 1,
                None => {
                    order.push(domain);
                    counts.push(1);
                }
            }
        }
        counts
    }
}

/// Distinct identifiers in first-appearance order.
fn distinct(values: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Count derivation with a unit-level population vector, with an
    //   explicit area-level domain list, and with no population data.
    // - Ordering and values of per-domain sample sizes.
    //
    // They intentionally DO NOT cover:
    // - Interaction with estimate tables (tested in `model::fit`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify count derivation for a unit-level setup where one population
    // domain has no sampled units.
    //
    // Given
    // -----
    // - A sample of 5 units over domains {a, b}, and a population of
    //   8 units over domains {a, b, c}.
    //
    // Expect
    // ------
    // - 2 sampled domains, 1 unobserved domain, 5 sampled units,
    //   Some(8) population units.
    fn sample_framework_unit_level_counts_are_derived() {
        // Arrange
        let sample = strings(&["a", "a", "b", "a", "b"]);
        let population = strings(&["a", "a", "a", "b", "b", "c", "c", "c"]);

        // Act
        let framework = SampleFramework::new(sample, Some(population), None);

        // Assert
        assert_eq!(framework.n_domains_sampled(), 2);
        assert_eq!(framework.n_domains_unobserved(), 1);
        assert_eq!(framework.n_units_sampled(), 5);
        assert_eq!(framework.n_units_population(), Some(8));
    }

    #[test]
    // Purpose
    // -------
    // Verify count derivation for an area-level setup with an explicit
    // population domain list and no unit-level population vector.
    //
    // Given
    // -----
    // - One sampled unit per domain in {a, b, c} and a population domain
    //   list {a, b, c, d, e}.
    //
    // Expect
    // ------
    // - 3 sampled domains, 2 unobserved domains, no population unit count.
    fn sample_framework_area_level_uses_explicit_domain_list() {
        // Arrange
        let sample = strings(&["a", "b", "c"]);
        let domains = strings(&["a", "b", "c", "d", "e"]);

        // Act
        let framework = SampleFramework::new(sample, None, Some(domains));

        // Assert
        assert_eq!(framework.n_domains_sampled(), 3);
        assert_eq!(framework.n_domains_unobserved(), 2);
        assert_eq!(framework.n_units_population(), None);
    }

    #[test]
    // Purpose
    // -------
    // Verify per-domain sample sizes follow first-appearance order.
    //
    // Given
    // -----
    // - Units in membership order [b, a, b, b, a].
    //
    // Expect
    // ------
    // - Sizes [3, 2]: domain b first with 3 units, then a with 2.
    fn sample_framework_domain_sample_sizes_follow_first_appearance() {
        // Arrange
        let sample = strings(&["b", "a", "b", "b", "a"]);

        // Act
        let framework = SampleFramework::new(sample, None, None);
        let sizes = framework.domain_sample_sizes();

        // Assert
        assert_eq!(sizes, vec![3, 2]);
        assert_eq!(framework.n_domains_unobserved(), 0);
    }
}
