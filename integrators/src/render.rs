//! Render

use crate::error::*;
use crate::lte_integrator::*;
use core::geometry::*;
use core::memory::*;
use core::pbrt::*;
use core::sampler::*;
use core::spectrum::*;

/// Number of consecutive rays handed to a worker at a time.
pub const RAYS_PER_JOB: usize = 64;

/// Evaluates the radiance along a batch of camera rays on a pool of worker
/// threads. Each worker owns a `WorkerContext` seeded with its index and a
/// `Sample` refilled for every ray. The radiance values are returned in the
/// order of `rays`.
///
/// * `integrator` - The integrator. Its samples must already be requested
///                  from `sampler`.
/// * `sampler`    - The sampler.
/// * `rays`       - Camera rays with normalized directions.
/// * `n_threads`  - Number of worker threads. 0 is treated as 1.
pub fn render_rays<I, S>(
    integrator: &I,
    sampler: &S,
    rays: &[Ray],
    n_threads: usize,
) -> Result<Vec<Spectrum>, RenderError>
where
    I: LTEIntegrator + Sync + ?Sized,
    S: Sampler + Sync + ?Sized,
{
    let n_threads = if n_threads == 0 {
        warn!("Render thread count 0 raised to 1");
        1
    } else {
        n_threads
    };

    let n_jobs = (rays.len() + RAYS_PER_JOB - 1) / RAYS_PER_JOB;
    info!("Rendering {} rays in {} jobs on {} threads", rays.len(), n_jobs, n_threads);

    let (result_tx, result_rx) = crossbeam_channel::unbounded();

    crossbeam::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded(n_threads);

        // Spawn worker threads.
        for worker in 0..n_threads {
            let rxc = rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move |_| {
                let mut ctx = WorkerContext::new(worker as u64);
                let mut sample = sampler.create_sample();
                for job in rxc.iter() {
                    let start = job * RAYS_PER_JOB;
                    let end = min(start + RAYS_PER_JOB, rays.len());
                    let batch: Vec<(usize, Spectrum)> = (start..end)
                        .map(|i| (i, trace(integrator, sampler, i, &rays[i], &mut sample, &mut ctx)))
                        .collect();
                    if result_tx.send(batch).is_err() {
                        break;
                    }
                }
                debug!("Worker {} done, arena holds {} bytes", worker, ctx.allocated_bytes());
            });
        }
        drop(rx); // Each worker holds its own clone.

        // Send work. Sending fails only when every worker is gone.
        for job in 0..n_jobs {
            if tx.send(job).is_err() {
                break;
            }
        }
    })
    .map_err(|_| RenderError::WorkerPanicked)?;
    drop(result_tx);

    let mut radiance = vec![Spectrum::ZERO; rays.len()];
    let mut received = 0;
    for batch in result_rx.iter() {
        for (i, l) in batch {
            radiance[i] = l;
            received += 1;
        }
    }

    if received != rays.len() {
        return Err(RenderError::MissingResults {
            expected: rays.len(),
            actual: received,
        });
    }
    Ok(radiance)
}

/// Returns the checked radiance along one camera ray and releases the
/// arena allocations made for it.
///
/// * `integrator` - The integrator.
/// * `sampler`    - The sampler.
/// * `index`      - Index of the ray in the batch.
/// * `ray`        - The ray.
/// * `sample`     - The worker's sample.
/// * `ctx`        - The worker's context.
fn trace<I, S>(
    integrator: &I,
    sampler: &S,
    index: usize,
    ray: &Ray,
    sample: &mut Sample,
    ctx: &mut WorkerContext,
) -> Spectrum
where
    I: LTEIntegrator + ?Sized,
    S: Sampler + ?Sized,
{
    sampler.fill_sample(sample, ctx.rng());
    let l = {
        let (arena, rng) = ctx.split();
        integrator.radiance(ray, Some(sample), arena, rng)
    };
    ctx.reset();

    if l.has_nans() {
        error!("Not-a-number radiance value returned for ray {}. Setting to black.", index);
        Spectrum::ZERO
    } else if !l.is_finite() {
        error!("Infinite radiance value returned for ray {}. Setting to black.", index);
        Spectrum::ZERO
    } else if l.min_component_value() < 0.0 {
        error!("Negative radiance value, {}, returned for ray {}. Setting to black.", l, index);
        Spectrum::ZERO
    } else {
        l
    }
}
