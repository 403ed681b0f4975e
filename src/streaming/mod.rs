//! # Chunk Streaming Controller
//!
//! The [`ChunkStreamer`] owns the chunk cache and drives the whole
//! pipeline. Once per tick it is given the observer's world position and it
//!
//! 1. evicts every cached chunk outside the streaming radius, releasing its
//!    render entry exactly once (eviction runs before loading to bound peak
//!    memory);
//! 2. requests generation for every desired coordinate not yet cached;
//! 3. applies finished generation results, discarding any whose coordinate
//!    has left the desired set in the meantime;
//! 4. schedules meshing for resident dirty chunks, snapshotting the chunk
//!    and its currently-loaded face neighbors for the task;
//! 5. applies finished meshes: uploads on this thread, swaps the render
//!    entry, and clears the dirty flag unless the chunk was edited while
//!    its mesh was in flight.
//!
//! ## Threading
//!
//! The cache map is touched only through `&mut self` on the thread calling
//! [`update`]; worker threads receive owned snapshots and shared references
//! to the immutable terrain generator, never the cache itself. GPU resources are created and destroyed only on the
//! controlling thread via the [`ChunkUploader`] boundary. The controller
//! never blocks on a single future: it polls whatever has finished and
//! moves on.
//!
//! [`update`]: ChunkStreamer::update

pub mod upload;

pub use upload::{ChunkUploader, UploadError};

use std::collections::HashMap;
use std::sync::Arc;

use cgmath::{Matrix4, Point3};
use log::{debug, error, warn};

use crate::config::{ConfigError, StreamingConfig};
use crate::executor::{TaskFuture, TaskPool};
use crate::meshing::{build_chunk_mesh, ChunkMeshData, MeshSettings};
use crate::voxels::{Chunk, ChunkCoord, NeighborhoodSnapshot, Side};
use crate::worldgen::TerrainGenerator;

/// A drawable chunk: the uploaded resource plus its model transform.
#[derive(Debug)]
pub struct RenderEntry<H> {
    /// Opaque handle from the upload boundary, owned by this entry.
    pub handle: H,
    /// Model transform: translation by
    /// `coordinate * chunk_size * voxel_spacing`.
    pub transform: Matrix4<f32>,
}

/// A meshing task in flight, tagged with the content revision it bakes.
struct InFlightMesh {
    future: TaskFuture<ChunkMeshData>,
    revision: u64,
}

/// Cache entry for one chunk coordinate.
///
/// The per-coordinate lifecycle is: absent, generating (`chunk` is `None`),
/// resident dirty, meshing, resident clean with a live render entry, and
/// finally evicted.
struct ChunkSlot<H> {
    /// Voxel data; `None` while the generation task runs.
    chunk: Option<Chunk>,
    generation: Option<TaskFuture<Chunk>>,
    meshing: Option<InFlightMesh>,
    /// Bumped on every content change; lets a finished mesh detect that it
    /// went stale while in flight.
    revision: u64,
    render: Option<RenderEntry<H>>,
}

impl<H> ChunkSlot<H> {
    fn generating(future: TaskFuture<Chunk>) -> Self {
        ChunkSlot {
            chunk: None,
            generation: Some(future),
            meshing: None,
            revision: 0,
            render: None,
        }
    }
}

/// Streams chunks around a moving observer.
///
/// Construct with [`ChunkStreamer::new`], call
/// [`update`](ChunkStreamer::update) once per tick from a single thread,
/// and draw whatever [`render_entries`](ChunkStreamer::render_entries)
/// yields. Dropping the streamer releases every render entry and joins the
/// worker threads.
pub struct ChunkStreamer<U: ChunkUploader> {
    config: StreamingConfig,
    terrain: Arc<TerrainGenerator>,
    mesh_settings: MeshSettings,
    pool: TaskPool,
    uploader: U,
    chunks: HashMap<ChunkCoord, ChunkSlot<U::Handle>>,
}

impl<U: ChunkUploader> ChunkStreamer<U> {
    /// Builds a streamer with noise terrain from the configuration.
    ///
    /// # Arguments
    /// * `config` - Validated up front; an invalid configuration is
    ///   rejected before any thread or cache state exists.
    /// * `uploader` - The GPU upload boundary, used only from the thread
    ///   that calls [`update`](ChunkStreamer::update).
    pub fn new(config: StreamingConfig, uploader: U) -> Result<Self, ConfigError> {
        let terrain = TerrainGenerator::new(&config)?;
        Self::with_terrain(config, terrain, uploader)
    }

    /// Builds a streamer around an explicit terrain generator.
    ///
    /// Useful for tests and demos that want deterministic terrain such as
    /// [`TerrainGenerator::flat`].
    pub fn with_terrain(
        config: StreamingConfig,
        terrain: TerrainGenerator,
        uploader: U,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = TaskPool::new(config.worker_threads)?;
        Ok(ChunkStreamer {
            config,
            terrain: Arc::new(terrain),
            mesh_settings: MeshSettings::default(),
            pool,
            uploader,
            chunks: HashMap::new(),
        })
    }

    /// Runs one streaming tick for the given observer position.
    pub fn update(&mut self, observer: Point3<f32>) {
        let center = ChunkCoord::from_world(observer, self.config.chunk_extent());

        self.evict_out_of_range(center);
        self.request_missing(center);
        self.apply_finished_generation();
        self.schedule_meshing();
        self.apply_finished_meshes();
    }

    /// Drops every cached chunk outside the streaming radius around
    /// `center`, releasing render entries as it goes.
    fn evict_out_of_range(&mut self, center: ChunkCoord) {
        let radius = self.config.stream_radius;
        let stale: Vec<ChunkCoord> = self
            .chunks
            .keys()
            .filter(|coord| coord.chebyshev_distance(center) > radius)
            .copied()
            .collect();

        for coord in stale {
            if let Some(slot) = self.chunks.remove(&coord) {
                if let Some(entry) = slot.render {
                    self.uploader.release(entry.handle);
                }
                // Dropping the slot closes its one-shot channels, so any
                // in-flight task result for this coordinate is discarded on
                // arrival instead of applied.
                debug!("evicted chunk {coord:?}");
            }
        }
    }

    /// Submits generation for every desired coordinate not yet cached.
    fn request_missing(&mut self, center: ChunkCoord) {
        let radius = self.config.stream_radius;
        let size = self.config.chunk_size;

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    let coord = ChunkCoord::new(center.x + dx, center.y + dy, center.z + dz);
                    if self.chunks.contains_key(&coord) {
                        continue;
                    }

                    let terrain = Arc::clone(&self.terrain);
                    match self.pool.submit(move || terrain.fill_chunk(coord, size)) {
                        Ok(future) => {
                            self.chunks.insert(coord, ChunkSlot::generating(future));
                        }
                        Err(closed) => {
                            // Only reachable when updating a shut-down
                            // streamer; nothing more can load this tick.
                            error!("cannot request chunk {coord:?}: {closed}");
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Stores finished generation results and re-dirties resident face
    /// neighbors so their border faces are re-culled against the new data.
    fn apply_finished_generation(&mut self) {
        let mut arrived = Vec::new();
        let mut failed = Vec::new();

        for (coord, slot) in self.chunks.iter_mut() {
            let outcome = match slot.generation.as_mut() {
                Some(future) => future.try_take(),
                None => continue,
            };

            match outcome {
                None => {}
                Some(Ok(chunk)) => {
                    slot.generation = None;
                    slot.revision += 1;
                    slot.chunk = Some(chunk);
                    arrived.push(*coord);
                }
                Some(Err(failure)) => {
                    error!("generation of chunk {coord:?} failed: {failure}");
                    failed.push(*coord);
                }
            }
        }

        // A failed coordinate is forgotten and re-requested on a later
        // tick; the failure itself has been logged loudly.
        for coord in failed {
            self.chunks.remove(&coord);
        }

        for coord in arrived {
            for side in Side::all() {
                self.mark_slot_dirty(coord.neighbor(side));
            }
        }
    }

    /// Marks a resident chunk dirty and bumps its revision.
    fn mark_slot_dirty(&mut self, coord: ChunkCoord) {
        if let Some(slot) = self.chunks.get_mut(&coord) {
            if let Some(chunk) = slot.chunk.as_mut() {
                chunk.mark_dirty();
                slot.revision += 1;
            }
        }
    }

    /// Submits meshing for every resident dirty chunk without one in
    /// flight.
    fn schedule_meshing(&mut self) {
        let dirty: Vec<ChunkCoord> = self
            .chunks
            .iter()
            .filter(|(_, slot)| {
                slot.meshing.is_none()
                    && slot.chunk.as_ref().is_some_and(|chunk| chunk.is_dirty())
            })
            .map(|(coord, _)| *coord)
            .collect();

        for coord in dirty {
            let Some(snapshot) = self.snapshot_neighborhood(coord) else {
                continue;
            };
            let Some(revision) = self.chunks.get(&coord).map(|slot| slot.revision) else {
                continue;
            };

            let settings = self.mesh_settings;
            match self
                .pool
                .submit(move || build_chunk_mesh(&snapshot.view(), &settings))
            {
                Ok(future) => {
                    if let Some(slot) = self.chunks.get_mut(&coord) {
                        slot.meshing = Some(InFlightMesh { future, revision });
                    }
                }
                Err(closed) => {
                    error!("cannot mesh chunk {coord:?}: {closed}");
                    return;
                }
            }
        }
    }

    /// Clones the chunk and its currently-loaded face neighbors for a
    /// meshing task. Returns `None` when the home chunk is not resident.
    fn snapshot_neighborhood(&self, coord: ChunkCoord) -> Option<NeighborhoodSnapshot> {
        let home = self.chunks.get(&coord)?.chunk.as_ref()?.clone();
        let neighbors = Side::all().map(|side| {
            self.chunks
                .get(&coord.neighbor(side))
                .and_then(|slot| slot.chunk.as_ref())
                .cloned()
        });
        Some(NeighborhoodSnapshot::new(home, neighbors))
    }

    /// Uploads finished meshes and swaps render entries.
    fn apply_finished_meshes(&mut self) {
        for (coord, slot) in self.chunks.iter_mut() {
            let finished = match slot.meshing.as_mut() {
                Some(inflight) => inflight
                    .future
                    .try_take()
                    .map(|outcome| (outcome, inflight.revision)),
                None => None,
            };
            let Some((outcome, meshed_revision)) = finished else {
                continue;
            };
            slot.meshing = None;

            let mesh = match outcome {
                Ok(mesh) => mesh,
                Err(failure) => {
                    // Leaves the chunk dirty, so it is retried next tick.
                    error!("meshing of chunk {coord:?} failed: {failure}");
                    continue;
                }
            };

            if mesh.is_empty() {
                // Nothing to draw; drop any previous entry.
                if let Some(previous) = slot.render.take() {
                    self.uploader.release(previous.handle);
                }
                if slot.revision == meshed_revision {
                    if let Some(chunk) = slot.chunk.as_mut() {
                        chunk.clear_dirty();
                    }
                }
                continue;
            }

            match self.uploader.upload(*coord, &mesh) {
                Ok(handle) => {
                    if let Some(previous) = slot.render.take() {
                        self.uploader.release(previous.handle);
                    }
                    let translation =
                        coord.translation(self.config.chunk_size, self.config.voxel_spacing);
                    slot.render = Some(RenderEntry {
                        handle,
                        transform: Matrix4::from_translation(translation),
                    });

                    // An edit that landed while the mesh was in flight
                    // keeps the chunk dirty and forces a re-mesh.
                    if slot.revision == meshed_revision {
                        if let Some(chunk) = slot.chunk.as_mut() {
                            chunk.clear_dirty();
                        }
                    }
                }
                Err(failure) => {
                    // Chunk stays dirty; the upload is retried next tick.
                    warn!("upload of chunk {coord:?} failed, retrying: {failure}");
                }
            }
        }
    }

    /// Edits one voxel in a resident chunk.
    ///
    /// The edit marks the chunk dirty for re-meshing. An edit on a chunk
    /// border also re-dirties the face-adjacent resident neighbors, whose
    /// meshes cull against this voxel.
    ///
    /// # Arguments
    /// * `world` - World voxel coordinate.
    /// * `solid` - New solidity.
    ///
    /// # Returns
    /// `false` when the owning chunk is absent or still generating.
    pub fn set_voxel(&mut self, world: Point3<i32>, solid: bool) -> bool {
        let size = self.config.chunk_size as i32;
        let coord = ChunkCoord::from_voxel(world, self.config.chunk_size);
        let local = Point3::new(
            world.x.rem_euclid(size),
            world.y.rem_euclid(size),
            world.z.rem_euclid(size),
        );

        let Some(slot) = self.chunks.get_mut(&coord) else {
            return false;
        };
        let Some(chunk) = slot.chunk.as_mut() else {
            return false;
        };

        chunk.set(local.x as usize, local.y as usize, local.z as usize, solid);
        slot.revision += 1;

        for side in Side::all() {
            let normal = side.normal();
            let on_border = (normal.x < 0 && local.x == 0)
                || (normal.x > 0 && local.x == size - 1)
                || (normal.y < 0 && local.y == 0)
                || (normal.y > 0 && local.y == size - 1)
                || (normal.z < 0 && local.z == 0)
                || (normal.z > 0 && local.z == size - 1);
            if on_border {
                self.mark_slot_dirty(coord.neighbor(side));
            }
        }
        true
    }

    /// Reads one voxel from a resident chunk.
    ///
    /// # Returns
    /// `None` when the owning chunk is absent or still generating.
    pub fn voxel_at(&self, world: Point3<i32>) -> Option<bool> {
        let size = self.config.chunk_size as i32;
        let coord = ChunkCoord::from_voxel(world, self.config.chunk_size);
        let chunk = self.chunks.get(&coord)?.chunk.as_ref()?;
        Some(chunk.get(
            world.x.rem_euclid(size) as usize,
            world.y.rem_euclid(size) as usize,
            world.z.rem_euclid(size) as usize,
        ))
    }

    /// Everything drawable this tick, in unspecified order.
    pub fn render_entries(&self) -> impl Iterator<Item = (ChunkCoord, &RenderEntry<U::Handle>)> {
        self.chunks
            .iter()
            .filter_map(|(coord, slot)| slot.render.as_ref().map(|entry| (*coord, entry)))
    }

    /// Whether a coordinate is cached (resident or generating).
    pub fn contains_chunk(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Number of cached coordinates, including ones still generating.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of generation tasks in flight.
    pub fn generating_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|slot| slot.generation.is_some())
            .count()
    }

    /// Number of meshing tasks in flight.
    pub fn meshing_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|slot| slot.meshing.is_some())
            .count()
    }

    /// Number of resident chunks whose mesh is stale.
    pub fn dirty_count(&self) -> usize {
        self.chunks
            .values()
            .filter(|slot| slot.chunk.as_ref().is_some_and(|chunk| chunk.is_dirty()))
            .count()
    }

    /// Whether the pipeline has nothing left to do for the current desired
    /// set. Demos and tests poll this between ticks instead of blocking on
    /// individual futures.
    pub fn is_idle(&self) -> bool {
        self.generating_count() == 0 && self.meshing_count() == 0 && self.dirty_count() == 0
    }

    /// The configuration this streamer was built with.
    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// The upload boundary, for presentation-side state that lives behind
    /// it.
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// Mutable access to the upload boundary. Must only be used from the
    /// controlling thread, like [`update`](ChunkStreamer::update).
    pub fn uploader_mut(&mut self) -> &mut U {
        &mut self.uploader
    }
}

impl<U: ChunkUploader> Drop for ChunkStreamer<U> {
    fn drop(&mut self) {
        // Stop accepting work, then release every live render entry exactly
        // once. The pool's own drop joins the workers afterwards.
        self.pool.shutdown();
        for (_, slot) in self.chunks.drain() {
            if let Some(entry) = slot.render {
                self.uploader.release(entry.handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;
    use std::thread;
    use std::time::Duration;

    /// Upload boundary double that records every handle's lifecycle.
    #[derive(Default)]
    struct MockState {
        next_handle: u32,
        live: HashSet<u32>,
        uploads: usize,
        releases: usize,
        fail_remaining: usize,
        meshes: HashMap<ChunkCoord, ChunkMeshData>,
    }

    #[derive(Clone, Default)]
    struct MockUploader {
        state: Rc<RefCell<MockState>>,
    }

    impl ChunkUploader for MockUploader {
        type Handle = u32;

        fn upload(
            &mut self,
            coord: ChunkCoord,
            mesh: &ChunkMeshData,
        ) -> Result<u32, UploadError> {
            let mut state = self.state.borrow_mut();
            if state.fail_remaining > 0 {
                state.fail_remaining -= 1;
                return Err(UploadError::new("injected failure"));
            }
            let handle = state.next_handle;
            state.next_handle += 1;
            state.live.insert(handle);
            state.uploads += 1;
            state.meshes.insert(coord, mesh.clone());
            Ok(handle)
        }

        fn release(&mut self, handle: u32) {
            let mut state = self.state.borrow_mut();
            assert!(
                state.live.remove(&handle),
                "handle {handle} released twice or never uploaded"
            );
            state.releases += 1;
        }
    }

    fn test_config() -> StreamingConfig {
        StreamingConfig {
            chunk_size: 8,
            stream_radius: 1,
            worker_threads: 2,
            ..Default::default()
        }
    }

    fn flat_streamer(height: i32) -> (ChunkStreamer<MockUploader>, Rc<RefCell<MockState>>) {
        let uploader = MockUploader::default();
        let state = Rc::clone(&uploader.state);
        let streamer =
            ChunkStreamer::with_terrain(test_config(), TerrainGenerator::flat(height), uploader)
                .unwrap();
        (streamer, state)
    }

    /// Ticks until the pipeline settles for a stationary observer.
    fn settle(streamer: &mut ChunkStreamer<MockUploader>, observer: Point3<f32>) {
        for _ in 0..2000 {
            streamer.update(observer);
            if streamer.is_idle() {
                return;
            }
            thread::sleep(Duration::from_millis(1));
        }
        panic!("streaming pipeline did not settle");
    }

    #[test]
    fn invalid_configurations_are_rejected_up_front() {
        let bad_radius = StreamingConfig {
            stream_radius: 0,
            ..test_config()
        };
        assert!(matches!(
            ChunkStreamer::new(bad_radius, MockUploader::default()),
            Err(ConfigError::InvalidRadius(0))
        ));

        let no_workers = StreamingConfig {
            worker_threads: 0,
            ..test_config()
        };
        assert!(matches!(
            ChunkStreamer::new(no_workers, MockUploader::default()),
            Err(ConfigError::NoWorkers)
        ));
    }

    #[test]
    fn every_coordinate_in_radius_becomes_resident() {
        let (mut streamer, _state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        assert_eq!(streamer.chunk_count(), 27);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    assert!(streamer.contains_chunk(ChunkCoord::new(dx, dy, dz)));
                }
            }
        }
    }

    #[test]
    fn moving_the_observer_evicts_and_releases_exactly_once() {
        let (mut streamer, state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        let old_handles: HashSet<u32> = state.borrow().live.iter().copied().collect();
        let old_entries = streamer.render_entries().count();
        assert!(old_entries > 0);
        assert_eq!(old_handles.len(), old_entries);

        // Far enough that the old and new desired sets are disjoint.
        settle(&mut streamer, Point3::new(800.5, 0.5, 0.5));

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    assert!(!streamer.contains_chunk(ChunkCoord::new(dx, dy, dz)));
                }
            }
        }

        let state = state.borrow();
        assert!(
            old_handles.is_disjoint(&state.live),
            "evicted handles must all be released"
        );
        assert!(state.releases >= old_entries);
        // Whatever is live now is exactly what the streamer can draw; the
        // mock itself asserts nothing was released twice.
        assert_eq!(state.live.len(), streamer.render_entries().count());
    }

    #[test]
    fn flat_terrain_matches_point_solidity_and_meshes_only_the_surface() {
        let height = 4;
        let (mut streamer, state) = flat_streamer(height);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        // Voxel solidity must match the generator rule everywhere resident.
        for world_y in -8..16 {
            let solid = streamer.voxel_at(Point3::new(3, world_y, 5)).unwrap();
            assert_eq!(solid, world_y < height, "solidity wrong at y={world_y}");
        }

        // The center chunk's mesh is exactly the surface: 8x8 top faces at
        // the height plane, everything else culled by solid neighbors.
        let state = state.borrow();
        let mesh = state
            .meshes
            .get(&ChunkCoord::new(0, 0, 0))
            .expect("surface chunk must have been meshed");
        assert_eq!(mesh.face_count(), 64);
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
            assert_eq!(vertex.position[1], height as f32);
        }
    }

    #[test]
    fn chunks_above_flat_terrain_have_no_render_entry() {
        let (mut streamer, _state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        let sky = ChunkCoord::new(0, 1, 0);
        assert!(streamer.contains_chunk(sky));
        assert!(streamer
            .render_entries()
            .all(|(coord, _)| coord != sky));
    }

    #[test]
    fn render_transforms_translate_by_chunk_extent() {
        let (mut streamer, _state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        let extent = streamer.config().chunk_extent();
        let (coord, entry) = streamer
            .render_entries()
            .find(|(coord, _)| *coord == ChunkCoord::new(1, 0, -1))
            .expect("surface chunk must be drawable");
        assert_eq!(entry.transform.w.x, coord.x as f32 * extent);
        assert_eq!(entry.transform.w.y, coord.y as f32 * extent);
        assert_eq!(entry.transform.w.z, coord.z as f32 * extent);
    }

    #[test]
    fn failed_uploads_are_retried_until_they_succeed() {
        let (mut streamer, state) = flat_streamer(4);
        state.borrow_mut().fail_remaining = 3;

        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        // Settling implies every dirty chunk eventually uploaded.
        let state = state.borrow();
        assert!(state.uploads > 0);
        assert_eq!(state.live.len(), streamer.render_entries().count());
    }

    #[test]
    fn border_edits_remesh_home_and_face_neighbors() {
        let height = 4;
        let (mut streamer, state) = flat_streamer(height);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        let faces_before = |state: &Rc<RefCell<MockState>>, coord: ChunkCoord| {
            state.borrow().meshes.get(&coord).unwrap().face_count()
        };
        let home_before = faces_before(&state, ChunkCoord::new(0, 0, 0));
        let west_before = faces_before(&state, ChunkCoord::new(-1, 0, 0));
        let north_before = faces_before(&state, ChunkCoord::new(0, 0, -1));

        // Carve out the surface voxel at the chunk corner column (0, _, 0).
        assert!(streamer.set_voxel(Point3::new(0, height - 1, 0), false));
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        let state = state.borrow();

        // Home chunk: one top face lost; the hole floor and its two
        // home-side walls gained.
        let home = state.meshes.get(&ChunkCoord::new(0, 0, 0)).unwrap();
        assert_eq!(home.face_count(), home_before - 1 + 3);

        // Each face neighbor across the edited border exposes one wall of
        // the hole.
        let west = state.meshes.get(&ChunkCoord::new(-1, 0, 0)).unwrap();
        assert_eq!(west.face_count(), west_before + 1);
        let north = state.meshes.get(&ChunkCoord::new(0, 0, -1)).unwrap();
        assert_eq!(north.face_count(), north_before + 1);
    }

    #[test]
    fn edits_outside_resident_chunks_are_rejected() {
        let (mut streamer, _state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));

        assert!(!streamer.set_voxel(Point3::new(500, 0, 0), true));
        assert_eq!(streamer.voxel_at(Point3::new(500, 0, 0)), None);
    }

    #[test]
    fn dropping_the_streamer_releases_every_live_handle() {
        let (mut streamer, state) = flat_streamer(4);
        settle(&mut streamer, Point3::new(0.5, 0.5, 0.5));
        assert!(!state.borrow().live.is_empty());

        drop(streamer);
        assert!(state.borrow().live.is_empty());
    }
}
