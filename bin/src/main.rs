//! Virtual goniophotometer driver.
//!
//! Builds the reference snow measurement: a slab of randomly generated ice
//! spheroids in air, measured over a grid of incident angles and wavelengths
//! with an equal-solid-angles collector sphere.

#[macro_use]
extern crate log;

use collectors::EqualSolidAnglesCollectorSphere;
use core::app::OPTIONS;
use core::error::Result;
use core::geometry::{Interval, SphericalCoordinates};
use core::job::PhotometerJob;
use core::mist::*;
use core::particle::{ArcParticleGenerator, WarpGrid};
use core::photometer::CollimatedBeamPhotometer;
use core::specimen::{MediumDef, ParticleDef};
use core::spectrum::PiecewiseLinearSpectrum;
use particles::RandomSpheroidParticleGenerator;
use specimens::GranularSpecimen;
use std::sync::Arc;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut job = build_job()?;
    job.run()?;
    if !OPTIONS.quiet {
        info!("cast {} photons in total", job.num_photons_cast());
    }
    Ok(())
}

/// Assemble the measurement job from the command line options and the
/// reference specimen.
fn build_job() -> Result<PhotometerJob> {
    let collector = EqualSolidAnglesCollectorSphere::new(9, 16, true, true)?;
    let photometer = CollimatedBeamPhotometer::new(Box::new(collector));

    let mut job = PhotometerJob::new();
    job.set_photometer(photometer);
    job.set_material(Box::new(build_specimen()?));
    job.set_incident_angles(&[
        SphericalCoordinates::new(0.0, 0.0),
        SphericalCoordinates::new(30.0_f64.to_radians(), 0.0),
        SphericalCoordinates::new(60.0_f64.to_radians(), 0.0),
    ]);
    job.set_wavelengths(&[500.0, 900.0, 1300.0]);
    job.set_n(OPTIONS.photons.unwrap_or(100_000));
    job.set_threads(OPTIONS.threads());
    job.set_verbose(OPTIONS.verbose && !OPTIONS.quiet);
    if let Some(path) = &OPTIONS.output_file {
        job.set_output(path);
    }
    Ok(job)
}

/// The reference specimen: 0.1 mm ice grains in air, 1 cm deep.
fn build_specimen() -> Result<GranularSpecimen> {
    let air_n = Arc::new(PiecewiseLinearSpectrum::constant(
        "air-n", 100.0, 3000.0, 1.0003,
    )?);
    let air_k = Arc::new(PiecewiseLinearSpectrum::constant("air-k", 100.0, 3000.0, 0.0)?);

    let ice_n = Arc::new(PiecewiseLinearSpectrum::new_uniform(
        "ice-n",
        500.0,
        1300.0,
        vec![1.313, 1.306, 1.292],
    )?);
    let ice_k = Arc::new(PiecewiseLinearSpectrum::new_uniform(
        "ice-k",
        500.0,
        1300.0,
        vec![1.9e-9, 4.8e-7, 1.2e-5],
    )?);

    let grain_size = Arc::new(PiecewiseLinearSpectrum::new_uniform(
        "grain-size",
        0.0,
        1.0,
        vec![5e-5, 1e-4, 2e-4],
    )?);
    let grain_sphericity = Arc::new(PiecewiseLinearSpectrum::new_uniform(
        "grain-sphericity",
        0.0,
        1.0,
        vec![0.7, 0.9, 1.0],
    )?);

    let generator: ArcParticleGenerator = Arc::new(RandomSpheroidParticleGenerator::new(
        WarpGrid::flat(0.0)?,
        WarpGrid::flat(0.0)?,
        grain_size,
        grain_sphericity,
        5e-4,
    )?);

    let mut specimen = GranularSpecimen::new();
    specimen.set_depth(0.01)?;
    specimen.set_media_types(vec![MediumDef::new("air", 1.0, air_n, air_k)])?;
    specimen.set_particles(vec![ParticleDef {
        name: "ice".to_string(),
        n: Some(ice_n),
        k: Some(ice_k),
        alpha: None,
        roundness_mean: 0.9,
        roundness_stdev: 0.05,
        roundness_range: Interval::new(0.7, 1.0),
        concentration: 1.0,
        generator,
    }])?;
    specimen.validate()?;
    Ok(specimen)
}
