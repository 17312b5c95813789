//! Random binary CSP instances.
//!
//! Instances follow the usual `<n, d, p1, p2>` parametrisation: `n`
//! variables with domain `{0, .., d-1}`, each pair constrained with
//! probability `p1` (density), and each value pair of a constraint
//! forbidden with probability `p2` (tightness).
//!
//! Forbidden pairs are not stored. Each constraint draws a salt from the
//! seeded generator and decides a pair by hashing `(salt, a, b)`, so an
//! instance is a pure function of its configuration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::model::Csp;
use super::variables::{Value, Variable};

/// Parameters of a random binary CSP.
///
/// # Examples
///
/// ```
/// use u_propagate::csp::RandomCspConfig;
///
/// let config = RandomCspConfig::default()
///     .with_variables(8)
///     .with_domain_size(4)
///     .with_density(0.5)
///     .with_tightness(0.3)
///     .with_seed(7);
/// let csp = config.generate().unwrap();
/// assert_eq!(csp.variable_count(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RandomCspConfig {
    /// Number of variables.
    pub variables: usize,
    /// Size of every domain.
    pub domain_size: usize,
    /// Probability that a pair of variables is constrained.
    pub density: f64,
    /// Probability that a value pair is forbidden in a constraint.
    pub tightness: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for RandomCspConfig {
    fn default() -> Self {
        Self {
            variables: 10,
            domain_size: 5,
            density: 0.4,
            tightness: 0.3,
            seed: 42,
        }
    }
}

impl RandomCspConfig {
    pub fn with_variables(mut self, n: usize) -> Self {
        self.variables = n;
        self
    }

    pub fn with_domain_size(mut self, d: usize) -> Self {
        self.domain_size = d;
        self
    }

    pub fn with_density(mut self, p: f64) -> Self {
        self.density = p;
        self
    }

    pub fn with_tightness(mut self, p: f64) -> Self {
        self.tightness = p;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.variables == 0 {
            return Err("variables must be positive".into());
        }
        if self.domain_size == 0 {
            return Err("domain_size must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(format!("density must be in [0, 1], got {}", self.density));
        }
        if !(0.0..=1.0).contains(&self.tightness) {
            return Err(format!(
                "tightness must be in [0, 1], got {}",
                self.tightness
            ));
        }
        Ok(())
    }

    /// Builds the instance described by this configuration.
    pub fn generate(&self) -> Result<Csp, String> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut csp = Csp::new(format!(
            "random<{},{},{},{}>",
            self.variables, self.domain_size, self.density, self.tightness
        ));

        let max_value = self.domain_size as Value - 1;
        let vars: Vec<_> = (0..self.variables)
            .map(|i| csp.add_variable(Variable::range(format!("x{i}"), 0, max_value)))
            .collect();

        // a pair is allowed when its hash lands at or above the tightness
        let tightness = self.tightness;
        for i in 0..vars.len() {
            for j in (i + 1)..vars.len() {
                if !rng.random_bool(self.density) {
                    continue;
                }
                let salt: u64 = rng.random();
                csp.add_predicate(format!("r({i},{j})"), vec![vars[i], vars[j]], move |t| {
                    unit_interval(mix(salt, t[0], t[1])) >= tightness
                })
                .map_err(|e| e.to_string())?;
            }
        }

        Ok(csp)
    }
}

/// SplitMix64 finaliser over the salt and both values.
fn mix(salt: u64, a: Value, b: Value) -> u64 {
    let mut z = salt
        ^ (a as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (b as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn unit_interval(h: u64) -> f64 {
    (h >> 11) as f64 / (1u64 << 53) as f64
}
