//! Photometer Job

use crate::error::{Error, Result};
use crate::geometry::SphericalCoordinates;
use crate::mist::*;
use crate::photometer::CollimatedBeamPhotometer;
use crate::specimen::BoxedSpecimen;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Executes a photometer measurement job.
///
/// A job owns a photometer instance and the requisite parameters to cast a
/// set of photons into the contained specimen for every combination of
/// incident angle and wavelength. Cells are processed sequentially; only the
/// casting within a cell is parallelized.
pub struct PhotometerJob {
    photometer: Option<CollimatedBeamPhotometer>,
    material: Option<BoxedSpecimen>,
    lambdas: Vec<Float>,
    incident: Vec<SphericalCoordinates>,
    n: usize,
    threads: usize,
    verbose: bool,
    output: Option<PathBuf>,
}

impl Default for PhotometerJob {
    /// Default construct the job. In this state not enough information is
    /// present to actually execute it.
    fn default() -> Self {
        Self {
            photometer: None,
            material: None,
            lambdas: Vec::new(),
            incident: Vec::new(),
            n: 0,
            threads: num_cpus::get(),
            verbose: false,
            output: None,
        }
    }
}

impl PhotometerJob {
    /// Default construct the job.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the incident angles to be used for measurement.
    ///
    /// * `incident` - The incident angles; the contents are copied.
    pub fn set_incident_angles(&mut self, incident: &[SphericalCoordinates]) {
        self.incident = incident.to_vec();
    }

    /// Provide access to the incident angle set.
    pub fn incident_angles(&self) -> &[SphericalCoordinates] {
        &self.incident
    }

    /// Set the wavelengths to be measured at each incident angle.
    ///
    /// * `wavelengths` - The wavelengths in nanometres; the contents are
    ///                   copied.
    pub fn set_wavelengths(&mut self, wavelengths: &[Float]) {
        self.lambdas = wavelengths.to_vec();
    }

    /// Provide access to the wavelength set.
    pub fn wavelengths(&self) -> &[Float] {
        &self.lambdas
    }

    /// Set the number of photons to cast per measurement cell, i.e. per
    /// incident angle per wavelength.
    ///
    /// * `n` - The photon count. Must be positive by the time `run` is
    ///         called.
    pub fn set_n(&mut self, n: usize) {
        self.n = n;
    }

    /// Get the number of photons cast per measurement cell.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Set the worker pool size used inside each cell.
    ///
    /// * `threads` - The pool size. Clamped to at least one at run time.
    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    /// Set the virtual photometer device to be used for measurement.
    /// Ownership transfers to the job.
    ///
    /// * `photometer` - The photometer device.
    pub fn set_photometer(&mut self, photometer: CollimatedBeamPhotometer) {
        self.photometer = Some(photometer);
    }

    /// Return a reference to the photometer for debug purposes, if set.
    pub fn photometer(&self) -> Option<&CollimatedBeamPhotometer> {
        self.photometer.as_ref()
    }

    /// Set the material to be measured. Ownership transfers to the job.
    ///
    /// * `material` - The specimen.
    pub fn set_material(&mut self, material: BoxedSpecimen) {
        self.material = Some(material);
    }

    /// Should verbose output be generated?
    ///
    /// * `verbose` - Set to true for per-cell statistics in the log.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set the filename to direct the report to. The default is stdout.
    ///
    /// * `fname` - The file name. It is created when `run` starts.
    pub fn set_output(&mut self, fname: impl Into<PathBuf>) {
        self.output = Some(fname.into());
    }

    /// Get the total number of photons cast so far.
    pub fn num_photons_cast(&self) -> u64 {
        self.photometer.as_ref().map_or(0, |p| p.num_photons_cast())
    }

    /// Execute the job synchronously. Fails fast with a configuration error
    /// before any photon is cast if required fields are unset.
    pub fn run(&mut self) -> Result<()> {
        self.validate()?;

        let mut sink: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout()),
        };

        // Checked by validate().
        let photometer = self.photometer.as_mut().unwrap();
        let material = self.material.as_ref().unwrap();
        let threads = max(self.threads, 1);

        let cells = self.incident.len() * self.lambdas.len();
        info!(
            "Running photometer job: {} incident angles x {} wavelengths, {} photons per cell",
            self.incident.len(),
            self.lambdas.len(),
            self.n
        );
        let progress = create_progress_bar(cells as u64);
        progress.set_message("Casting photons");

        writeln!(
            sink,
            "# polar azimuth wavelength sensor hits solid_angle projected_solid_angle"
        )?;

        for (angle, lambda) in self
            .incident
            .iter()
            .cartesian_product(self.lambdas.iter())
        {
            photometer.clear();
            photometer.set_incident_angle(*angle);
            photometer.set_wavelength(*lambda);
            photometer.cast(material.as_ref(), self.n, threads)?;

            let cs = photometer.collector();
            for sensor_id in 0..cs.num_sensors() {
                writeln!(
                    sink,
                    "{:.6} {:.6} {:.3} {} {} {:.9} {:.9}",
                    angle.polar,
                    angle.azimuth,
                    lambda,
                    sensor_id,
                    cs.hits(sensor_id)?,
                    cs.solid_angle(sensor_id)?,
                    cs.projected_solid_angle(sensor_id)?,
                )?;
            }

            if self.verbose {
                let stats = photometer.statistics();
                info!(
                    "Cell (θ={:.4}, φ={:.4}, λ={lambda}): {} cast, {} reflected, {} transmitted, {} absorbed, {} missed",
                    angle.polar,
                    angle.azimuth,
                    stats.cast,
                    stats.reflected,
                    stats.transmitted,
                    stats.absorbed,
                    stats.missed
                );
            }
            progress.inc(1);
        }

        sink.flush()?;
        progress.finish_with_message("Job complete");
        Ok(())
    }

    /// Check that enough information is present to execute the job.
    fn validate(&self) -> Result<()> {
        if self.photometer.is_none() {
            return Err(Error::config("no photometer device has been set"));
        }
        if self.material.is_none() {
            return Err(Error::config("no material has been set"));
        }
        if self.incident.is_empty() {
            return Err(Error::config("incident angle set is empty"));
        }
        if self.lambdas.is_empty() {
            return Err(Error::config("wavelength set is empty"));
        }
        if self.lambdas.iter().any(|l| !(*l > 0.0)) {
            return Err(Error::config("wavelengths must be positive"));
        }
        if self.n == 0 {
            return Err(Error::config("photon count per cell must be positive"));
        }
        Ok(())
    }
}

/// Create a progress bar for the measurement grid.
///
/// * `len` - Total number of cells.
fn create_progress_bar(len: u64) -> ProgressBar {
    let style = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} cells",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_job_fails_fast() {
        let mut job = PhotometerJob::new();
        let err = job.run().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(job.num_photons_cast(), 0);
    }

    #[test]
    fn empty_angle_set_is_rejected() {
        let mut job = PhotometerJob::new();
        job.set_wavelengths(&[500.0]);
        job.set_n(10);
        assert!(job.run().is_err());
        assert_eq!(job.num_photons_cast(), 0);
    }
}
