use crate::classifiers::Classifier;
use crate::classifiers::drift_detection::ChangeDetector;
use crate::classifiers::meta::cdcms::{CdcmsConfig, CdcmsError, Pool, Repository, ScoredModel};
use crate::clusterers::{Clusterer, ClusteringError};
use crate::core::instances::{Instance, InstanceRef};
use crate::evaluation::Measurement;
use crate::utils::votes;
use log::{debug, warn};
use rayon::prelude::*;
use std::sync::Arc;

/// Drift assessment for the current instance.
///
/// `Outcontrol` holds from the instance on which the detector confirmed a
/// change until the next instance is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftState {
    Normal,
    Outcontrol,
}

/// Drift-adaptive ensemble over pools of scored models.
///
/// Processing is strictly sequential: every pool transition depends on state
/// left by the previous instance, so instances must arrive exactly once and
/// in order. Within one instance, per-member work fans out across threads.
///
/// The per-instance lifecycle:
/// 1. the instance enters the sliding window;
/// 2. the active pool's error on it feeds the drift detector;
/// 3. on a stationary step, the candidate trains — or, on window
///    boundaries, rotates into the active pool (retiring the weakest
///    member into the repository) or triggers a clustering-based recall of
///    repository models similar to the candidate;
/// 4. on a confirmed drift, the active pool is snapshotted, retired into
///    the repository, and rebuilt around the candidate while a recovered
///    pool is assembled from clustered repository models;
/// 5. all live pools observe the instance and the active pool trains on it.
pub struct Cdcms {
    config: CdcmsConfig,
    prototype: Box<dyn Classifier>,
    detector: Box<dyn ChangeDetector>,
    clusterer: Box<dyn Clusterer>,

    active: Pool,
    old: Option<Pool>,
    recovered: Option<Pool>,
    repository: Repository,
    candidate: ScoredModel,

    window: Vec<InstanceRef>,
    instances_since_drift: usize,
    training_weight_seen: f64,
    drifts_confirmed: u64,
    drift_state: DriftState,
    previous_drift_state: DriftState,
}

/// Fresh untrained model cloned off the configured prototype.
fn fresh_model(prototype: &dyn Classifier, fading_factor: f64) -> ScoredModel {
    let mut model = prototype.clone_box();
    model.reset_learning();
    ScoredModel::new(model, fading_factor)
}

impl Cdcms {
    /// Builds the ensemble around a base-learner prototype, a drift detector
    /// and a clustering backend.
    ///
    /// Fails only on invalid configuration; nothing after construction
    /// surfaces an error to the host.
    pub fn new(
        config: CdcmsConfig,
        prototype: Box<dyn Classifier>,
        detector: Box<dyn ChangeDetector>,
        clusterer: Box<dyn Clusterer>,
    ) -> Result<Self, CdcmsError> {
        config.validate()?;

        let mut active = Pool::new(config.fading_factor, true);
        active.push(fresh_model(&*prototype, config.fading_factor));
        let candidate = fresh_model(&*prototype, config.fading_factor);
        let repository =
            Repository::new(config.repository_capacity(), config.similarity_threshold);

        Ok(Self {
            active,
            old: None,
            recovered: None,
            repository,
            candidate,
            window: Vec::with_capacity(config.window_size),
            instances_since_drift: 0,
            training_weight_seen: 0.0,
            drifts_confirmed: 0,
            drift_state: DriftState::Normal,
            previous_drift_state: DriftState::Normal,
            config,
            prototype,
            detector,
            clusterer,
        })
    }

    /// Processes one labeled instance: updates the window and the drift
    /// detector, transitions pool membership, then trains the live pools.
    pub fn train_on_instance(&mut self, instance: InstanceRef) {
        if self.window.len() >= self.config.window_size {
            self.window.remove(0);
        }
        self.window.push(Arc::clone(&instance));
        self.instances_since_drift += 1;
        self.training_weight_seen += instance.weight();

        let vote = self.active.get_votes_for_instance(&*instance);
        let correct = match (votes::max_index(&vote), instance.class_value()) {
            (Some(predicted), Some(label)) => predicted == label as usize,
            _ => false,
        };
        self.detector.input(if correct { 0.0 } else { 1.0 });

        self.drift_state = if self.detector.change_detected() {
            DriftState::Outcontrol
        } else {
            DriftState::Normal
        };

        match self.drift_state {
            DriftState::Normal => self.normal_step(&instance),
            DriftState::Outcontrol => self.drift_step(),
        }

        if let Some(old) = self.old.as_mut() {
            old.update_accuracy(&*instance);
        }
        if let Some(recovered) = self.recovered.as_mut() {
            recovered.update_accuracy(&*instance);
        }
        self.active.update_accuracy(&*instance);
        self.active.train_on_instance(&*instance);
    }

    /// Read-only prediction for `instance`.
    ///
    /// Normally the active pool answers alone. When the active pool is
    /// strictly dominated by both the old and the recovered pool — or while
    /// a drift is being confirmed — the three pools' normalized votes are
    /// combined, each scaled by its share of the summed accuracies. Pools
    /// with zero accuracy (including empty ones) contribute nothing.
    pub fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        let accuracy_active = self.active.accuracy();
        let accuracy_old = self.old.as_ref().map_or(0.0, Pool::accuracy);
        let accuracy_recovered = self.recovered.as_ref().map_or(0.0, Pool::accuracy);

        let dominated = self.old.is_some()
            && self.recovered.is_some()
            && accuracy_active < accuracy_old
            && accuracy_active < accuracy_recovered;

        if self.drift_state == DriftState::Normal && !dominated {
            return self.active.get_votes_for_instance(instance);
        }

        let accuracy_sum = accuracy_active + accuracy_old + accuracy_recovered;
        let mut combined = Vec::new();
        let contributions = [
            (self.old.as_ref(), accuracy_old),
            (self.recovered.as_ref(), accuracy_recovered),
            (Some(&self.active), accuracy_active),
        ];
        for (pool, accuracy) in contributions {
            let Some(pool) = pool else { continue };
            if accuracy <= 0.0 {
                continue;
            }
            let mut vote = pool.get_votes_for_instance(instance);
            if votes::sum(&vote) <= 0.0 {
                continue;
            }
            votes::normalize(&mut vote);
            if accuracy_sum > 0.0 {
                votes::scale(&mut vote, accuracy / accuracy_sum);
            }
            votes::add_assign(&mut combined, &vote);
        }
        combined
    }

    /// Stationary step: recall, rotate or keep training the candidate.
    fn normal_step(&mut self, instance: &InstanceRef) {
        let window_size = self.config.window_size;

        let mut handled = false;
        if self.instances_since_drift == window_size
            && self.drifts_confirmed > 0
            && !self.repository.is_empty()
        {
            handled = self.recall_similar_models();
        }

        if !handled {
            if self.instances_since_drift % window_size == 0 && self.training_weight_seen > 0.0 {
                self.rotate_candidate_in();
            } else {
                self.candidate.update_accuracy(&**instance);
                self.candidate.train_on_instance(&**instance);
            }
        }

        self.previous_drift_state = DriftState::Normal;
    }

    /// One window after a drift: cluster the repository together with the
    /// candidate and pull the candidate's cluster mates into the active
    /// pool. Returns whether the clustering pass went through; on backend
    /// failure the caller falls back to the non-clustering schedule.
    fn recall_similar_models(&mut self) -> bool {
        let outcome = self.cluster_pass(true);
        self.clusterer.reset();

        match outcome {
            Ok(_) => {
                let tag = self.candidate.cluster_tag();
                let mut recalled = 0usize;
                for i in self.repository_order_by_weight() {
                    if self.active.len() >= self.config.pool_size {
                        break;
                    }
                    let member = &self.repository.members()[i];
                    if member.cluster_tag() == tag {
                        self.active.push(member.deep_clone());
                        recalled += 1;
                    }
                }
                debug!("recalled {recalled} repository model(s) into the active pool");
                true
            }
            Err(e) => {
                warn!("clustering failed during recall, skipping this round: {e}");
                false
            }
        }
    }

    /// Window boundary: retire the weakest active member if the pool is
    /// full, induct the candidate, and start training a fresh one.
    fn rotate_candidate_in(&mut self) {
        if self.active.len() >= self.config.pool_size {
            if let Some(worst) = self.active.remove_worst() {
                let admitted = self.repository.offer(worst, &self.window);
                debug!("retired weakest active model (kept in repository: {admitted})");
            }
        }

        let next = fresh_model(&*self.prototype, self.config.fading_factor);
        let candidate = std::mem::replace(&mut self.candidate, next);
        self.active.push(candidate);
    }

    /// Confirmed drift: snapshot the active pool, retire its members,
    /// assemble a recovered pool from the repository and restart the active
    /// pool around the candidate.
    fn drift_step(&mut self) {
        self.drifts_confirmed += 1;
        debug!(
            "drift confirmed after {} instance(s), rebuilding pools",
            self.instances_since_drift
        );

        self.old = Some(self.active.deep_clone());

        // Free admissions ride on headroom measured before any eviction.
        let mut headroom = self.repository.capacity() - self.repository.len();
        for member in self.active.drain() {
            if headroom > 0 {
                self.repository.admit(member);
                headroom -= 1;
            } else {
                self.repository.offer(member, &self.window);
            }
        }

        let mut recovered = Pool::new(self.config.fading_factor, false);
        if self.previous_drift_state == DriftState::Normal && self.repository.len() > 1 {
            // The same candidate object restarts from scratch on the new
            // concept; only its trained parameters are discarded.
            self.candidate.reset_learning();
            self.build_recovered_pool(&mut recovered);
        }

        let mut active = Pool::new(self.config.fading_factor, true);
        let next = fresh_model(&*self.prototype, self.config.fading_factor);
        active.push(std::mem::replace(&mut self.candidate, next));
        self.active = active;

        self.active.reset_accuracy();
        if let Some(old) = self.old.as_mut() {
            old.reset_accuracy();
        }
        recovered.reset_accuracy();
        self.recovered = Some(recovered);

        self.window.clear();
        self.instances_since_drift = 0;
        self.previous_drift_state = DriftState::Outcontrol;
    }

    /// Fills the recovered pool: one representative per cluster (highest tag
    /// first, least-trained member of each cluster) when the backend found
    /// real structure, otherwise every n-th repository member by stride.
    fn build_recovered_pool(&mut self, pool: &mut Pool) {
        let outcome = self.cluster_pass(false);
        self.clusterer.reset();

        match outcome {
            Ok(cluster_count) if cluster_count > 1 => {
                let order = self.repository_order_by_weight();
                for tag in (0..cluster_count as i32).rev() {
                    if pool.len() >= self.config.pool_size {
                        break;
                    }
                    let representative = order
                        .iter()
                        .copied()
                        .find(|&i| self.repository.members()[i].cluster_tag() == tag);
                    if let Some(i) = representative {
                        pool.push(self.repository.members()[i].deep_clone());
                    }
                }
                debug!("recovered pool rebuilt from {} cluster(s)", cluster_count);
            }
            Ok(_) => self.sample_repository_by_stride(pool),
            Err(e) => {
                warn!("clustering failed while rebuilding, sampling repository instead: {e}");
                self.sample_repository_by_stride(pool);
            }
        }
    }

    /// Non-clustering fallback: deep-clone every n-th repository member into
    /// the pool, oldest positions first.
    fn sample_repository_by_stride(&self, pool: &mut Pool) {
        let stride = self.config.repository_multiple;
        let mut i = 0;
        while i < self.repository.len() && pool.len() < self.config.pool_size {
            pool.push(self.repository.members()[i].deep_clone());
            i += stride;
        }
    }

    /// Builds the correctness matrix over the window (one row per repository
    /// member, candidate last when included), fits the backend and writes
    /// the assigned cluster tags back row-for-row.
    ///
    /// The matrix lives and dies inside this call; nothing else ever sees
    /// the clustering buffer.
    fn cluster_pass(&mut self, include_candidate: bool) -> Result<usize, ClusteringError> {
        let window = &self.window;
        let mut matrix: Vec<Vec<f64>> = self
            .repository
            .members()
            .par_iter()
            .map(|member| member.correctness_row(window))
            .collect();
        if include_candidate {
            matrix.push(self.candidate.correctness_row(window));
        }

        let cluster_count = self.clusterer.fit(&matrix)?;

        let repository_len = self.repository.len();
        for (i, row) in matrix.iter().enumerate() {
            let tag = self.clusterer.assign(row)? as i32;
            if i < repository_len {
                self.repository.members_mut()[i].set_cluster_tag(tag);
            } else {
                self.candidate.set_cluster_tag(tag);
            }
        }
        Ok(cluster_count)
    }

    /// Repository indexes sorted by ascending cumulative training weight.
    /// The sort is stable, so equal weights keep repository order.
    fn repository_order_by_weight(&self) -> Vec<usize> {
        let members = self.repository.members();
        let mut order: Vec<usize> = (0..members.len()).collect();
        order.sort_by(|&a, &b| {
            members[a]
                .training_weight_seen()
                .total_cmp(&members[b].training_weight_seen())
        });
        order
    }

    pub fn config(&self) -> &CdcmsConfig {
        &self.config
    }

    pub fn drift_state(&self) -> DriftState {
        self.drift_state
    }

    pub fn active_pool(&self) -> &Pool {
        &self.active
    }

    pub fn old_pool(&self) -> Option<&Pool> {
        self.old.as_ref()
    }

    pub fn recovered_pool(&self) -> Option<&Pool> {
        self.recovered.as_ref()
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn candidate(&self) -> &ScoredModel {
        &self.candidate
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn instances_since_drift(&self) -> usize {
        self.instances_since_drift
    }

    pub fn drifts_confirmed(&self) -> u64 {
        self.drifts_confirmed
    }

    /// Snapshot of the ensemble's state for host-side reporting.
    pub fn measurements(&self) -> Vec<Measurement> {
        let mut out = vec![
            Measurement::new("active pool size", self.active.len() as f64),
            Measurement::new("active pool accuracy", self.active.accuracy()),
            Measurement::new(
                "old pool accuracy",
                self.old.as_ref().map_or(0.0, Pool::accuracy),
            ),
            Measurement::new(
                "recovered pool accuracy",
                self.recovered.as_ref().map_or(0.0, Pool::accuracy),
            ),
            Measurement::new("repository size", self.repository.len() as f64),
            Measurement::new("drifts confirmed", self.drifts_confirmed as f64),
        ];
        if let Some(q) = self.active.mean_diversity(&self.window) {
            out.push(Measurement::new("active pool mean pairwise q", q));
        }
        out
    }
}
