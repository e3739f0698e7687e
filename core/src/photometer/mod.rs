//! Collimated Beam Photometer

use crate::collector::{BoxedCollectorSphere, CollectorSphere};
use crate::error::{Error, Result};
use crate::geometry::*;
use crate::mist::*;
use crate::rng::RNG;
use crate::specimen::{Interaction, Specimen};
use crate::spectrum::{ComplexIndex, SpectralSample};
use std::fmt;

/// Number of photons a worker casts between visits to the batch channel.
const BATCH_SIZE: usize = 1024;

/// Per-cell casting statistics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CastStatistics {
    /// Photons cast.
    pub cast: u64,

    /// Photons that left on the incident side.
    pub reflected: u64,

    /// Photons that left on the far side.
    pub transmitted: u64,

    /// Photons absorbed inside the specimen.
    pub absorbed: u64,

    /// Photons whose exit direction matched no enabled sensor.
    pub missed: u64,
}

impl CastStatistics {
    /// Merge another statistics block into this one.
    ///
    /// * `other` - The statistics to add.
    fn merge(&mut self, other: &CastStatistics) {
        self.cast += other.cast;
        self.reflected += other.reflected;
        self.transmitted += other.transmitted;
        self.absorbed += other.absorbed;
        self.missed += other.missed;
    }
}

/// Private per-batch accumulator. Workers count into one of these and the
/// results are merged into the collector sphere after the pool joins, so the
/// per-photon path takes no lock.
struct Tally {
    hits: Vec<u64>,
    stats: CastStatistics,
}

impl Tally {
    fn new(num_sensors: usize) -> Self {
        Self {
            hits: vec![0; num_sensors],
            stats: CastStatistics::default(),
        }
    }
}

/// A virtual collimated beam photometer. It acts on one incident angle and
/// one wavelength at a time; `clear` must be called before it is reused for
/// a new measurement cell. Data collection is generic over the contained
/// collector sphere.
pub struct CollimatedBeamPhotometer {
    /// The collector sphere used to collect results.
    cs: BoxedCollectorSphere,

    /// The incident angle each photon is cast from.
    incident: SphericalCoordinates,

    /// The wavelength being measured, in nanometres.
    wavelength: Float,

    /// Statistics for the current cell.
    stats: CastStatistics,

    /// Total photons cast over the photometer's lifetime.
    photons_cast: u64,
}

impl CollimatedBeamPhotometer {
    /// Construct a photometer around a collector sphere. The photometer
    /// starts aimed at the zenith with an unrealistic wavelength of zero;
    /// both must be set before casting.
    ///
    /// * `cs` - The collector sphere, ownership transfers to the photometer.
    pub fn new(cs: BoxedCollectorSphere) -> Self {
        Self {
            cs,
            incident: SphericalCoordinates::default(),
            wavelength: 0.0,
            stats: CastStatistics::default(),
            photons_cast: 0,
        }
    }

    /// Set the incident angle for the next cell.
    ///
    /// * `incident` - The incident angle in spherical coordinates.
    pub fn set_incident_angle(&mut self, incident: SphericalCoordinates) {
        self.incident = incident;
    }

    /// Return the incident angle each ray is being cast from.
    pub fn incident_angle(&self) -> SphericalCoordinates {
        self.incident
    }

    /// Set the wavelength for the next cell.
    ///
    /// * `wavelength` - The wavelength in nanometres.
    pub fn set_wavelength(&mut self, wavelength: Float) {
        self.wavelength = wavelength;
    }

    /// Query the wavelength currently being tested.
    pub fn wavelength(&self) -> Float {
        self.wavelength
    }

    /// Clear the collector sphere and the per-cell statistics for reuse on a
    /// new measurement cell.
    pub fn clear(&mut self) {
        self.cs.clear();
        self.stats = CastStatistics::default();
    }

    /// Read-only access to the collector sphere.
    pub fn collector(&self) -> &dyn CollectorSphere {
        self.cs.as_ref()
    }

    /// Statistics collected for the current cell.
    pub fn statistics(&self) -> &CastStatistics {
        &self.stats
    }

    /// Query the number of photons cast over the photometer's lifetime.
    pub fn num_photons_cast(&self) -> u64 {
        self.photons_cast
    }

    /// Cast `n` photon paths into the specimen for the current cell,
    /// partitioned across a pool of `threads` workers, and aggregate the
    /// resulting exit directions into the collector sphere.
    ///
    /// Photon batches are seeded independently of the worker that runs them,
    /// so aggregate results do not depend on the pool size. A failure inside
    /// any worker is fatal to the cell and surfaces here.
    ///
    /// * `specimen` - The material under test.
    /// * `n`        - The number of photons to cast. Must be positive.
    /// * `threads`  - The worker pool size. Clamped to at least one.
    pub fn cast(&mut self, specimen: &dyn Specimen, n: usize, threads: usize) -> Result<()> {
        if n == 0 {
            return Err(Error::config("photon count must be positive"));
        }
        let threads = max(threads, 1);
        let num_sensors = self.cs.num_sensors();
        let batch_count = (n + BATCH_SIZE - 1) / BATCH_SIZE;
        let base_seed = self.base_seed();

        // The beam travels from the incident angle toward the entry point at
        // the origin.
        let entry = Ray::new(
            Point3f::origin(),
            -self.incident.to_vector().normalize(),
        );
        let ss = SpectralSample::new(self.wavelength, 1.0);
        let ambient = ComplexIndex::vacuum();
        let cs: &dyn CollectorSphere = self.cs.as_ref();

        debug!(
            "Casting {n} photons in {batch_count} batches across {threads} workers at {} nm",
            self.wavelength
        );

        let tallies: Result<Vec<Tally>> = crossbeam::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<usize>(threads);
            let (tx_out, rx_out) = crossbeam_channel::unbounded::<Result<Tally>>();

            // Spawn worker threads.
            for _ in 0..threads {
                let rxc = rx.clone();
                let txo = tx_out.clone();
                scope.spawn(move |_| {
                    for batch in rxc.iter() {
                        let count = min(BATCH_SIZE, n - batch * BATCH_SIZE);
                        let seed = base_seed.wrapping_add(batch as u64);
                        let result =
                            cast_batch(specimen, cs, &entry, &ss, &ambient, seed, count, num_sensors);
                        if txo.send(result).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(rx); // Drop extra rx since we've cloned one for each worker.
            drop(tx_out); // Same for the result sender.

            // Send work.
            for batch in 0..batch_count {
                if tx.send(batch).is_err() {
                    break;
                }
            }
            drop(tx);

            rx_out.iter().collect()
        })
        .map_err(|_| Error::Worker("photon casting pool panicked".to_string()))?;

        // Deterministic reduction into the shared sphere after the pool join.
        for tally in tallies? {
            for (sensor_id, count) in tally.hits.iter().enumerate() {
                if *count > 0 {
                    self.cs.add_hits(sensor_id, *count);
                }
            }
            self.stats.merge(&tally.stats);
        }
        self.photons_cast += n as u64;

        Ok(())
    }

    /// Derive a per-cell seed from the incident angle and wavelength so runs
    /// are reproducible. FNV-1a over the raw float bits.
    fn base_seed(&self) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for bits in [
            self.wavelength.to_bits(),
            self.incident.polar.to_bits(),
            self.incident.azimuth.to_bits(),
        ] {
            h ^= bits;
            h = h.wrapping_mul(0x100000001b3);
        }
        h
    }
}

impl fmt::Display for CollimatedBeamPhotometer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CollimatedBeamPhotometer {{sensors: {}, incident: {}, wavelength: {} nm}}",
            self.cs.num_sensors(),
            self.incident,
            self.wavelength
        )
    }
}

/// Run one batch of photon paths to termination and tally the outcomes.
#[allow(clippy::too_many_arguments)]
fn cast_batch(
    specimen: &dyn Specimen,
    cs: &dyn CollectorSphere,
    entry: &Ray,
    ss: &SpectralSample,
    ambient: &ComplexIndex,
    seed: u64,
    count: usize,
    num_sensors: usize,
) -> Result<Tally> {
    let mut rng = RNG::new(seed);
    let mut tally = Tally::new(num_sensors);

    for _ in 0..count {
        let result = specimen.scatter(entry, ss, ambient, &mut rng);
        tally.stats.cast += 1;

        match result.interaction() {
            Interaction::Absorbed => tally.stats.absorbed += 1,
            interaction => {
                let exit_ray = result
                    .exit_ray()
                    .ok_or_else(|| Error::Worker("terminal ray without exit direction".to_string()))?;
                if exit_ray.d.has_nans() {
                    return Err(Error::Worker(format!(
                        "NaN exit direction for photon at {} nm",
                        ss.lambda
                    )));
                }
                match interaction {
                    Interaction::Reflected => tally.stats.reflected += 1,
                    Interaction::Transmitted => tally.stats.transmitted += 1,
                    Interaction::Absorbed => unreachable!(),
                }
                match cs.sensor_id(exit_ray) {
                    Some(id) => tally.hits[id] += 1,
                    None => tally.stats.missed += 1,
                }
            }
        }
    }

    Ok(tally)
}
