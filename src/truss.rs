//! Core data structures and algorithms for planar truss analysis.

use std::collections::HashMap;

use log::debug;
use nalgebra::{DMatrix, DVector, Vector4};
use petgraph::graph::{EdgeIndex, Graph, NodeIndex};

use crate::element::AxialElement;
use crate::errors::{AnalysisError, TrussEditError};
use crate::fixity::Fixity;
use crate::geometry::{Displacement, Force, Point};
use crate::properties::{CrossSection, Material};

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
struct Joint {
    /// Position of the joint in metres.
    position: Point,
    /// Boundary condition, fixed at construction.
    fixity: Fixity,
    /// Non-negative economic weight, ignored by the solver.
    cost: f64,
    /// External load applied to the joint in newtons.
    load: Force,
    /// Solved displacement, absent until an analysis completes.
    displacement: Option<Displacement>,
}

impl Joint {
    /// Create a joint with the supplied position and fixity.
    fn new(position: Point, fixity: Fixity) -> Self {
        Self {
            position,
            fixity,
            cost: 0.0,
            load: Force::default(),
            displacement: None,
        }
    }
}

/// Internal representation of a truss member.
#[derive(Clone, Debug)]
struct Member {
    /// Cross-section providing the area.
    section: CrossSection,
    /// Material providing the elastic modulus.
    material: Material,
    /// Axial force in newtons, absent until an analysis completes.
    axial_force: Option<f64>,
}

impl Member {
    /// Create a member with the supplied properties.
    fn new(section: CrossSection, material: Material) -> Self {
        Self {
            section,
            material,
            axial_force: None,
        }
    }
}

/// Container for a planar pin-jointed truss model.
///
/// Joints own two translational degrees of freedom each, numbered x-before-y
/// in joint insertion order: joint `n` owns global indices `2n` and `2n + 1`.
/// Loading and displacement vectors follow the same convention.
///
/// Solving mutates joint displacements and member axial forces in place, so a
/// single `Truss` must not be solved from multiple threads at once; batch
/// callers should keep the displacement vectors returned by
/// [`Truss::direct_stiffness`].
#[derive(Debug, Default)]
pub struct Truss {
    /// Underlying graph storage for joints and members.
    graph: Graph<Joint, Member>,
    /// Indicates whether the cached analysis results are current.
    analysis_valid: bool,
}

impl Truss {
    /// Create an empty truss.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::Truss;
    ///
    /// let truss = Truss::new();
    /// assert_eq!(truss.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            analysis_valid: false,
        }
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total number of translational degrees of freedom.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        2 * self.joint_count()
    }

    /// Add a new joint to the truss.
    ///
    /// The fixity is fixed for the lifetime of the joint.
    ///
    /// # Examples
    /// ```
    /// use planar_truss::{point, Fixity, Truss};
    ///
    /// let mut truss = Truss::new();
    /// let joint = truss.add_joint(point(0.0, 0.0), Fixity::Pin);
    /// assert_eq!(truss.joint_count(), 1);
    /// assert_eq!(joint.index(), 0);
    /// ```
    pub fn add_joint(&mut self, position: Point, fixity: Fixity) -> NodeIndex {
        self.invalidate();
        self.graph.add_node(Joint::new(position, fixity))
    }

    /// Update the position of an existing joint.
    ///
    /// Member geometry is recomputed from current joint positions at solve
    /// time, so moving a joint is always reflected in the next analysis.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), TrussEditError> {
        if self.graph.node_weight(joint).is_none() {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        if let Some(node) = self.graph.node_weight_mut(joint) {
            node.position = position;
        }
        Ok(())
    }

    /// Remove a joint and all connected members from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn remove_joint(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        if self.graph.node_weight(joint).is_none() {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        self.graph.remove_node(joint);
        Ok(())
    }

    /// Assign an economic cost to a joint.
    ///
    /// The cost plays no role in the analysis; it is bookkeeping for sizing
    /// and layout studies built on top of the solver.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss and [`TrussEditError::NegativeJointCost`] when `cost` is
    /// negative.
    pub fn set_joint_cost(&mut self, joint: NodeIndex, cost: f64) -> Result<(), TrussEditError> {
        if cost < 0.0 {
            return Err(TrussEditError::NegativeJointCost { joint, cost });
        }
        if let Some(node) = self.graph.node_weight_mut(joint) {
            node.cost = cost;
            Ok(())
        } else {
            Err(TrussEditError::UnknownJoint(joint))
        }
    }

    /// Retrieve the cost assigned to a joint.
    #[must_use]
    pub fn joint_cost(&self, joint: NodeIndex) -> Option<f64> {
        self.graph.node_weight(joint).map(|joint| joint.cost)
    }

    /// Sum of all joint costs.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.graph.node_weights().map(|joint| joint.cost).sum()
    }

    /// Retrieve the position of a joint.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Point> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Retrieve the fixity of a joint.
    #[must_use]
    pub fn joint_fixity(&self, joint: NodeIndex) -> Option<Fixity> {
        self.graph.node_weight(joint).map(|joint| joint.fixity)
    }

    /// Connect two joints with a new axial member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when either endpoint is not
    /// part of this truss, [`TrussEditError::ZeroLengthMember`] when the
    /// endpoints coincide and [`TrussEditError::InvalidMemberProperties`]
    /// when the cross-section encloses no area.
    pub fn add_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
        section: CrossSection,
        material: Material,
    ) -> Result<EdgeIndex, TrussEditError> {
        let start_position = self
            .joint_position(start)
            .ok_or(TrussEditError::UnknownJoint(start))?;
        let end_position = self
            .joint_position(end)
            .ok_or(TrussEditError::UnknownJoint(end))?;
        if (end_position.to_vector() - start_position.to_vector()).norm() == 0.0 {
            return Err(TrussEditError::ZeroLengthMember { start, end });
        }
        let section = section.validated()?;
        self.invalidate();
        Ok(self.graph.add_edge(start, end, Member::new(section, material)))
    }

    /// Remove a member from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of
    /// this truss.
    pub fn remove_member(&mut self, member: EdgeIndex) -> Result<(), TrussEditError> {
        if self.graph.edge_weight(member).is_none() {
            return Err(TrussEditError::UnknownMember(member));
        }
        self.invalidate();
        self.graph.remove_edge(member);
        Ok(())
    }

    /// Retrieve the endpoint joints of a member.
    #[must_use]
    pub fn member_endpoints(&self, member: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(member)
    }

    /// Apply a point load to a joint, replacing any previous load.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of
    /// this truss.
    pub fn set_load(&mut self, joint: NodeIndex, load: Force) -> Result<(), TrussEditError> {
        if self.graph.node_weight(joint).is_none() {
            return Err(TrussEditError::UnknownJoint(joint));
        }
        self.invalidate();
        if let Some(node) = self.graph.node_weight_mut(joint) {
            node.load = load;
        }
        Ok(())
    }

    /// Assemble the global loading vector from the stored per-joint loads.
    ///
    /// Entries follow the global degree-of-freedom numbering: the load on
    /// joint `n` lands at indices `2n` (x) and `2n + 1` (y).
    #[must_use]
    pub fn load_vector(&self) -> DVector<f64> {
        let index_map = self.node_index_map();
        let mut loading = DVector::zeros(self.dof_count());
        for node in self.graph.node_indices() {
            let joint = &self.graph[node];
            let base = index_map[&node] * 2;
            loading[base] = joint.load.x;
            loading[base + 1] = joint.load.y;
        }
        loading
    }

    /// Retrieve the displacement of a joint.
    ///
    /// Returns `None` until an analysis has completed.
    #[must_use]
    pub fn joint_displacement(&self, joint: NodeIndex) -> Option<Displacement> {
        self.graph
            .node_weight(joint)
            .and_then(|joint| joint.displacement)
    }

    /// Retrieve the axial force in a member. Positive values denote tension.
    ///
    /// Returns `None` until an analysis has completed.
    #[must_use]
    pub fn member_axial_force(&self, member: EdgeIndex) -> Option<f64> {
        self.graph
            .edge_weight(member)
            .and_then(|member| member.axial_force)
    }

    /// Retrieve the axial stress in a member, force divided by area.
    ///
    /// Returns `None` until an analysis has completed.
    #[must_use]
    pub fn member_stress(&self, member: EdgeIndex) -> Option<f64> {
        let member = self.graph.edge_weight(member)?;
        let axial_force = member.axial_force?;
        Some(axial_force / member.section.area())
    }

    /// Retrieve the factor of safety against yielding for a member.
    ///
    /// Returns `None` until an analysis has completed or when the material
    /// carries no yield strength.
    #[must_use]
    pub fn member_factor_of_safety(&self, member: EdgeIndex) -> Option<f64> {
        let yield_strength = self.graph.edge_weight(member)?.material.yield_strength()?;
        let stress = self.member_stress(member)?;
        Some(if stress == 0.0 {
            f64::INFINITY
        } else {
            (yield_strength / stress).abs()
        })
    }

    /// Whether the structure passes the static determinacy check.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.check_stability().is_ok()
    }

    /// Run the direct stiffness method under the supplied loading vector.
    ///
    /// `loading` holds one force pair per joint at indices `(2n, 2n + 1)`.
    /// On success every joint displacement and member axial force is updated
    /// in place and the full global displacement vector is returned, indexed
    /// the same way, so callers can batch multiple load cases. On failure no
    /// result field is touched.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::LoadingSizeMismatch`] when `loading` has the
    /// wrong length, [`AnalysisError::Unstable`] when the structure fails the
    /// determinacy check, [`AnalysisError::ZeroLengthMember`] when a joint
    /// has been moved onto a neighbour and [`AnalysisError::SingularStiffness`]
    /// when the reduced system cannot be solved.
    pub fn direct_stiffness(
        &mut self,
        loading: &DVector<f64>,
    ) -> Result<DVector<f64>, AnalysisError> {
        let expected = self.dof_count();
        if loading.len() != expected {
            return Err(AnalysisError::LoadingSizeMismatch {
                expected,
                actual: loading.len(),
            });
        }
        self.check_stability()?;
        // Results are about to reflect the supplied loading rather than the
        // stored per-joint loads, so the evaluate() cache no longer applies.
        self.analysis_valid = false;
        let index_map = self.node_index_map();
        let stiffness = self.build_stiffness_matrix(&index_map)?;
        let free_dofs = self.collect_free_dofs(&index_map);
        debug!(
            "solving {} joints, {} members: {} of {} degrees of freedom free",
            self.joint_count(),
            self.member_count(),
            free_dofs.len(),
            expected
        );
        let displacements = Self::solve_displacements(&stiffness, loading, &free_dofs)?;
        self.store_joint_displacements(&index_map, &displacements);
        self.update_member_forces(&index_map, &displacements);
        Ok(displacements)
    }

    /// Analyse the truss under the stored per-joint loads.
    ///
    /// Results are cached: repeated calls without intervening edits return
    /// immediately.
    ///
    /// # Errors
    ///
    /// Propagates every failure mode of [`Truss::direct_stiffness`].
    pub fn evaluate(&mut self) -> Result<(), AnalysisError> {
        if self.analysis_valid {
            return Ok(());
        }
        let loading = self.load_vector();
        self.direct_stiffness(&loading)?;
        self.analysis_valid = true;
        Ok(())
    }

    /// Reset analysis results when the topology or properties change.
    ///
    /// Results may be present without the `evaluate()` cache being valid
    /// (after a [`Truss::direct_stiffness`] call with a custom loading), so
    /// the fields are cleared unconditionally.
    fn invalidate(&mut self) {
        for joint in self.graph.node_weights_mut() {
            joint.displacement = None;
        }
        for member in self.graph.edge_weights_mut() {
            member.axial_force = None;
        }
        self.analysis_valid = false;
    }

    /// Verify static determinacy: the members and restrained degrees of
    /// freedom must together constrain every joint degree of freedom.
    ///
    /// Kinematic instabilities that pass this count (collinear mechanisms and
    /// the like) surface later as [`AnalysisError::SingularStiffness`].
    fn check_stability(&self) -> Result<(), AnalysisError> {
        let joints = self.joint_count();
        let members = self.member_count();
        let restrained: usize = self
            .graph
            .node_weights()
            .map(|joint| joint.fixity.restrained_count())
            .sum();
        if joints == 0 || members + restrained < 2 * joints {
            return Err(AnalysisError::Unstable {
                joints,
                members,
                restrained,
            });
        }
        Ok(())
    }

    /// Construct a mapping from graph indices to contiguous joint ordinals.
    fn node_index_map(&self) -> HashMap<NodeIndex, usize> {
        self.graph
            .node_indices()
            .enumerate()
            .map(|(ordinal, node)| (node, ordinal))
            .collect()
    }

    /// Build the stiffness element for a member at its current geometry.
    fn member_element(&self, member: EdgeIndex) -> Result<AxialElement, AnalysisError> {
        let (start, end) = self.graph.edge_endpoints(member).expect("valid edge");
        let weight = &self.graph[member];
        AxialElement::new(
            self.graph[start].position,
            self.graph[end].position,
            &weight.section,
            &weight.material,
        )
        .ok_or(AnalysisError::ZeroLengthMember(member))
    }

    /// Global degree-of-freedom indices coupled by a member, start before end.
    fn member_dofs(&self, member: EdgeIndex, index_map: &HashMap<NodeIndex, usize>) -> [usize; 4] {
        let (start, end) = self.graph.edge_endpoints(member).expect("valid edge");
        let start_base = index_map[&start] * 2;
        let end_base = index_map[&end] * 2;
        [start_base, start_base + 1, end_base, end_base + 1]
    }

    /// Assemble the global stiffness matrix for the current configuration.
    fn build_stiffness_matrix(
        &self,
        index_map: &HashMap<NodeIndex, usize>,
    ) -> Result<DMatrix<f64>, AnalysisError> {
        let dof = self.dof_count();
        let mut matrix = DMatrix::zeros(dof, dof);
        for edge in self.graph.edge_indices() {
            let element = self.member_element(edge)?;
            let local = element.global_stiffness();
            let dof_map = self.member_dofs(edge, index_map);
            for (row_local, global_row) in dof_map.iter().enumerate() {
                for (col_local, global_col) in dof_map.iter().enumerate() {
                    matrix[(*global_row, *global_col)] += local[(row_local, col_local)];
                }
            }
        }
        Ok(matrix)
    }

    /// Determine the indices corresponding to unconstrained degrees of freedom.
    fn collect_free_dofs(&self, index_map: &HashMap<NodeIndex, usize>) -> Vec<usize> {
        let mut free = Vec::new();
        for node in self.graph.node_indices() {
            let joint = &self.graph[node];
            let base = index_map[&node] * 2;
            for axis in 0..2 {
                if joint.fixity.is_free(axis) {
                    free.push(base + axis);
                }
            }
        }
        free
    }

    /// Solve for joint displacements using the reduced stiffness matrix.
    ///
    /// Restrained degrees of freedom keep zero displacement.
    fn solve_displacements(
        stiffness: &DMatrix<f64>,
        loading: &DVector<f64>,
        free_dofs: &[usize],
    ) -> Result<DVector<f64>, AnalysisError> {
        let mut displacements = DVector::zeros(loading.len());
        let free_len = free_dofs.len();
        if free_len == 0 {
            return Ok(displacements);
        }
        let mut k_ff = DMatrix::zeros(free_len, free_len);
        let mut f_f = DVector::zeros(free_len);
        for (row_idx, &row) in free_dofs.iter().enumerate() {
            f_f[row_idx] = loading[row];
            for (col_idx, &col) in free_dofs.iter().enumerate() {
                k_ff[(row_idx, col_idx)] = stiffness[(row, col)];
            }
        }
        let solution = k_ff
            .lu()
            .solve(&f_f)
            .ok_or(AnalysisError::SingularStiffness)?;
        for (idx, &dof) in free_dofs.iter().enumerate() {
            displacements[dof] = solution[idx];
        }
        Ok(displacements)
    }

    /// Persist solved joint displacements back to the graph representation.
    fn store_joint_displacements(
        &mut self,
        index_map: &HashMap<NodeIndex, usize>,
        displacements: &DVector<f64>,
    ) {
        for node in self.graph.node_indices() {
            let base = index_map[&node] * 2;
            let joint = self.graph.node_weight_mut(node).expect("valid node");
            joint.displacement = Some(Displacement::new(
                displacements[base],
                displacements[base + 1],
            ));
        }
    }

    /// Recover member axial forces from the global displacement vector.
    fn update_member_forces(
        &mut self,
        index_map: &HashMap<NodeIndex, usize>,
        displacements: &DVector<f64>,
    ) {
        for edge in self.graph.edge_indices() {
            // Zero-length members were rejected during assembly, so the
            // element is always available here.
            let Ok(element) = self.member_element(edge) else {
                continue;
            };
            let [s_x, s_y, e_x, e_y] = self.member_dofs(edge, index_map);
            let member_displacements = Vector4::new(
                displacements[s_x],
                displacements[s_y],
                displacements[e_x],
                displacements[e_y],
            );
            let axial_force = element.axial_force(&member_displacements);
            if let Some(member) = self.graph.edge_weight_mut(edge) {
                member.axial_force = Some(axial_force);
            }
        }
    }
}
