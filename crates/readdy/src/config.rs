use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the actin membrane model.
///
/// Every field has a default, so an empty override set yields a usable
/// configuration. Rate constants are in the engine's units (1/ns for
/// unimolecular, nm³/ns for bimolecular reactions); lengths are in nm.
///
/// The adapter itself reads only `internal_timestep`, `random_seed`, and the
/// layout fields used for the initial state. Everything else is passed
/// through to the engine when it builds its system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub name: String,
    pub internal_timestep: f64,
    pub box_size: [f64; 3],
    pub periodic_boundary: bool,
    pub reaction_distance: f64,
    pub n_cpu: usize,
    pub only_linear_actin_constraints: bool,
    pub reactions: bool,

    // Reaction rates
    pub dimerize_rate: f64,
    pub dimerize_reverse_rate: f64,
    pub trimerize_rate: f64,
    pub trimerize_reverse_rate: f64,
    #[serde(rename = "pointed_growth_ATP_rate")]
    pub pointed_growth_atp_rate: f64,
    #[serde(rename = "pointed_growth_ADP_rate")]
    pub pointed_growth_adp_rate: f64,
    #[serde(rename = "pointed_shrink_ATP_rate")]
    pub pointed_shrink_atp_rate: f64,
    #[serde(rename = "pointed_shrink_ADP_rate")]
    pub pointed_shrink_adp_rate: f64,
    #[serde(rename = "barbed_growth_ATP_rate")]
    pub barbed_growth_atp_rate: f64,
    #[serde(rename = "barbed_growth_ADP_rate")]
    pub barbed_growth_adp_rate: f64,
    #[serde(rename = "nucleate_ATP_rate")]
    pub nucleate_atp_rate: f64,
    #[serde(rename = "nucleate_ADP_rate")]
    pub nucleate_adp_rate: f64,
    #[serde(rename = "barbed_shrink_ATP_rate")]
    pub barbed_shrink_atp_rate: f64,
    #[serde(rename = "barbed_shrink_ADP_rate")]
    pub barbed_shrink_adp_rate: f64,
    #[serde(rename = "arp_bind_ATP_rate")]
    pub arp_bind_atp_rate: f64,
    #[serde(rename = "arp_bind_ADP_rate")]
    pub arp_bind_adp_rate: f64,
    #[serde(rename = "arp_unbind_ATP_rate")]
    pub arp_unbind_atp_rate: f64,
    #[serde(rename = "arp_unbind_ADP_rate")]
    pub arp_unbind_adp_rate: f64,
    #[serde(rename = "barbed_growth_branch_ATP_rate")]
    pub barbed_growth_branch_atp_rate: f64,
    #[serde(rename = "barbed_growth_branch_ADP_rate")]
    pub barbed_growth_branch_adp_rate: f64,
    #[serde(rename = "debranching_ATP_rate")]
    pub debranching_atp_rate: f64,
    #[serde(rename = "debranching_ADP_rate")]
    pub debranching_adp_rate: f64,
    pub cap_bind_rate: f64,
    pub cap_unbind_rate: f64,
    pub hydrolysis_actin_rate: f64,
    pub hydrolysis_arp_rate: f64,
    pub nucleotide_exchange_actin_rate: f64,
    pub nucleotide_exchange_arp_rate: f64,

    pub verbose: bool,

    // Confinement boxes and obstacles
    pub use_box_actin: bool,
    pub use_box_arp: bool,
    pub use_box_cap: bool,
    pub obstacle_radius: f64,
    pub obstacle_diff_coeff: f64,
    pub use_box_obstacle: bool,
    pub position_obstacle_stride: u32,

    // Pointed end displacement
    pub displace_pointed_end_tangent: bool,
    pub displace_pointed_end_radial: bool,
    pub tangent_displacement_nm: f64,
    pub radial_displacement_radius_nm: f64,
    pub radial_displacement_angle_deg: f64,
    pub longitudinal_bonds: bool,
    pub displace_stride: u32,

    // Force constants
    pub bonds_force_multiplier: f64,
    pub angles_force_constant: f64,
    pub dihedrals_force_constant: f64,
    pub actin_constraints: bool,

    pub actin_box_center_x: f64,
    pub actin_box_center_y: f64,
    pub actin_box_center_z: f64,
    pub actin_box_size_x: f64,
    pub actin_box_size_y: f64,
    pub actin_box_size_z: f64,
    pub add_extra_box: bool,
    pub barbed_binding_site: bool,
    pub binding_site_reaction_distance: f64,

    // Membrane
    pub add_membrane: bool,
    pub membrane_center_x: f64,
    pub membrane_center_y: f64,
    pub membrane_center_z: f64,
    pub membrane_size_x: f64,
    pub membrane_size_y: f64,
    pub membrane_size_z: f64,
    pub membrane_particle_radius: f64,

    pub obstacle_controlled_position_x: f64,
    pub obstacle_controlled_position_y: f64,
    pub obstacle_controlled_position_z: f64,

    pub random_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "actin_membrane".into(),
            internal_timestep: 0.1,
            box_size: [150.0, 150.0, 150.0],
            periodic_boundary: true,
            reaction_distance: 1.0,
            n_cpu: 4,
            only_linear_actin_constraints: true,
            reactions: true,
            dimerize_rate: 1e-30,
            dimerize_reverse_rate: 1.4e-9,
            trimerize_rate: 2.1e-2,
            trimerize_reverse_rate: 1.4e-9,
            pointed_growth_atp_rate: 2.4e-5,
            pointed_growth_adp_rate: 2.95e-6,
            pointed_shrink_atp_rate: 8.0e-10,
            pointed_shrink_adp_rate: 3.0e-10,
            barbed_growth_atp_rate: 1e30,
            barbed_growth_adp_rate: 7.0e-5,
            nucleate_atp_rate: 2.1e-2,
            nucleate_adp_rate: 7.0e-5,
            barbed_shrink_atp_rate: 1.4e-9,
            barbed_shrink_adp_rate: 8.0e-9,
            arp_bind_atp_rate: 2.1e-2,
            arp_bind_adp_rate: 7.0e-5,
            arp_unbind_atp_rate: 1.4e-9,
            arp_unbind_adp_rate: 8.0e-9,
            barbed_growth_branch_atp_rate: 2.1e-2,
            barbed_growth_branch_adp_rate: 7.0e-5,
            debranching_atp_rate: 1.4e-9,
            debranching_adp_rate: 7.0e-5,
            cap_bind_rate: 2.1e-2,
            cap_unbind_rate: 1.4e-9,
            hydrolysis_actin_rate: 1e-30,
            hydrolysis_arp_rate: 3.5e-5,
            nucleotide_exchange_actin_rate: 1e-5,
            nucleotide_exchange_arp_rate: 1e-5,
            verbose: false,
            use_box_actin: true,
            use_box_arp: false,
            use_box_cap: false,
            obstacle_radius: 0.0,
            obstacle_diff_coeff: 0.0,
            use_box_obstacle: false,
            position_obstacle_stride: 0,
            displace_pointed_end_tangent: false,
            displace_pointed_end_radial: false,
            tangent_displacement_nm: 0.0,
            radial_displacement_radius_nm: 0.0,
            radial_displacement_angle_deg: 0.0,
            longitudinal_bonds: true,
            displace_stride: 1,
            bonds_force_multiplier: 0.2,
            angles_force_constant: 1000.0,
            dihedrals_force_constant: 1000.0,
            actin_constraints: true,
            actin_box_center_x: 12.0,
            actin_box_center_y: 0.0,
            actin_box_center_z: 0.0,
            actin_box_size_x: 20.0,
            actin_box_size_y: 50.0,
            actin_box_size_z: 50.0,
            add_extra_box: false,
            barbed_binding_site: true,
            binding_site_reaction_distance: 3.0,
            add_membrane: true,
            membrane_center_x: 25.0,
            membrane_center_y: 0.0,
            membrane_center_z: 0.0,
            membrane_size_x: 0.0,
            membrane_size_y: 100.0,
            membrane_size_z: 100.0,
            membrane_particle_radius: 2.5,
            obstacle_controlled_position_x: 0.0,
            obstacle_controlled_position_y: 0.0,
            obstacle_controlled_position_z: 0.0,
            random_seed: 0,
        }
    }
}

/// Errors that can occur when building or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid overrides: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{name}` must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("`{name}` must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("`{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("n_cpu must be at least 1")]
    NoWorkers,
}

impl Config {
    /// Builds a configuration from a partial set of overrides.
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the overrides do not deserialize or the resulting
    /// configuration is invalid.
    pub fn from_overrides(overrides: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from JSON text holding a partial set of overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not deserialize or the resulting
    /// configuration is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("internal_timestep", self.internal_timestep)?;
        for (axis, value) in ["box_size.x", "box_size.y", "box_size.z"]
            .into_iter()
            .zip(self.box_size)
        {
            positive(axis, value)?;
        }
        if self.n_cpu == 0 {
            return Err(ConfigError::NoWorkers);
        }

        for (name, value) in self.rates() {
            non_negative(name, value)?;
        }

        non_negative("reaction_distance", self.reaction_distance)?;
        non_negative(
            "binding_site_reaction_distance",
            self.binding_site_reaction_distance,
        )?;
        non_negative("obstacle_radius", self.obstacle_radius)?;
        non_negative("obstacle_diff_coeff", self.obstacle_diff_coeff)?;
        non_negative("bonds_force_multiplier", self.bonds_force_multiplier)?;
        non_negative("angles_force_constant", self.angles_force_constant)?;
        non_negative("dihedrals_force_constant", self.dihedrals_force_constant)?;
        non_negative("tangent_displacement_nm", self.tangent_displacement_nm)?;
        non_negative(
            "radial_displacement_radius_nm",
            self.radial_displacement_radius_nm,
        )?;
        finite(
            "radial_displacement_angle_deg",
            self.radial_displacement_angle_deg,
        )?;

        non_negative("actin_box_size_x", self.actin_box_size_x)?;
        non_negative("actin_box_size_y", self.actin_box_size_y)?;
        non_negative("actin_box_size_z", self.actin_box_size_z)?;
        finite("actin_box_center_x", self.actin_box_center_x)?;
        finite("actin_box_center_y", self.actin_box_center_y)?;
        finite("actin_box_center_z", self.actin_box_center_z)?;

        non_negative("membrane_size_x", self.membrane_size_x)?;
        non_negative("membrane_size_y", self.membrane_size_y)?;
        non_negative("membrane_size_z", self.membrane_size_z)?;
        finite("membrane_center_x", self.membrane_center_x)?;
        finite("membrane_center_y", self.membrane_center_y)?;
        finite("membrane_center_z", self.membrane_center_z)?;
        if self.add_membrane {
            positive("membrane_particle_radius", self.membrane_particle_radius)?;
        }

        finite(
            "obstacle_controlled_position_x",
            self.obstacle_controlled_position_x,
        )?;
        finite(
            "obstacle_controlled_position_y",
            self.obstacle_controlled_position_y,
        )?;
        finite(
            "obstacle_controlled_position_z",
            self.obstacle_controlled_position_z,
        )?;

        Ok(())
    }

    /// Returns every reaction rate with its serialized name.
    #[must_use]
    pub fn rates(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("dimerize_rate", self.dimerize_rate),
            ("dimerize_reverse_rate", self.dimerize_reverse_rate),
            ("trimerize_rate", self.trimerize_rate),
            ("trimerize_reverse_rate", self.trimerize_reverse_rate),
            ("pointed_growth_ATP_rate", self.pointed_growth_atp_rate),
            ("pointed_growth_ADP_rate", self.pointed_growth_adp_rate),
            ("pointed_shrink_ATP_rate", self.pointed_shrink_atp_rate),
            ("pointed_shrink_ADP_rate", self.pointed_shrink_adp_rate),
            ("barbed_growth_ATP_rate", self.barbed_growth_atp_rate),
            ("barbed_growth_ADP_rate", self.barbed_growth_adp_rate),
            ("nucleate_ATP_rate", self.nucleate_atp_rate),
            ("nucleate_ADP_rate", self.nucleate_adp_rate),
            ("barbed_shrink_ATP_rate", self.barbed_shrink_atp_rate),
            ("barbed_shrink_ADP_rate", self.barbed_shrink_adp_rate),
            ("arp_bind_ATP_rate", self.arp_bind_atp_rate),
            ("arp_bind_ADP_rate", self.arp_bind_adp_rate),
            ("arp_unbind_ATP_rate", self.arp_unbind_atp_rate),
            ("arp_unbind_ADP_rate", self.arp_unbind_adp_rate),
            (
                "barbed_growth_branch_ATP_rate",
                self.barbed_growth_branch_atp_rate,
            ),
            (
                "barbed_growth_branch_ADP_rate",
                self.barbed_growth_branch_adp_rate,
            ),
            ("debranching_ATP_rate", self.debranching_atp_rate),
            ("debranching_ADP_rate", self.debranching_adp_rate),
            ("cap_bind_rate", self.cap_bind_rate),
            ("cap_unbind_rate", self.cap_unbind_rate),
            ("hydrolysis_actin_rate", self.hydrolysis_actin_rate),
            ("hydrolysis_arp_rate", self.hydrolysis_arp_rate),
            (
                "nucleotide_exchange_actin_rate",
                self.nucleotide_exchange_actin_rate,
            ),
            (
                "nucleotide_exchange_arp_rate",
                self.nucleotide_exchange_arp_rate,
            ),
        ]
    }

    /// Center of the box free actin monomers are confined to.
    #[must_use]
    pub fn actin_box_center(&self) -> [f64; 3] {
        [
            self.actin_box_center_x,
            self.actin_box_center_y,
            self.actin_box_center_z,
        ]
    }

    /// Edge lengths of the box free actin monomers are confined to.
    #[must_use]
    pub fn actin_box_size(&self) -> [f64; 3] {
        [
            self.actin_box_size_x,
            self.actin_box_size_y,
            self.actin_box_size_z,
        ]
    }

    #[must_use]
    pub fn membrane_center(&self) -> [f64; 3] {
        [
            self.membrane_center_x,
            self.membrane_center_y,
            self.membrane_center_z,
        ]
    }

    #[must_use]
    pub fn membrane_size(&self) -> [f64; 3] {
        [
            self.membrane_size_x,
            self.membrane_size_y,
            self.membrane_size_z,
        ]
    }

    #[must_use]
    pub fn obstacle_controlled_position(&self) -> [f64; 3] {
        [
            self.obstacle_controlled_position_x,
            self.obstacle_controlled_position_y,
            self.obstacle_controlled_position_z,
        ]
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    Ok(())
}
