//! Recording frame graph with automatic dependency resolution
//!
//! Passes are recorded through [`PassBuilder`] and ordered on [`FrameGraph::build`].
//! Resource names may be written more than once per frame (ping-pong
//! buffers), so dependencies are derived in record order: a read depends on
//! the most recent writer, a write waits for every reader of the previous
//! contents and for the previous writer.

use crate::builder::{LoadOp, PassBuilder, ShadingProgram};
use crate::{Error, Format, Result, Viewport};
use std::collections::{HashMap, VecDeque};

/// Output target declared by a recorded pass
#[derive(Debug, Clone, PartialEq)]
pub struct RasterView {
    pub resource: String,
    pub format: Format,
    pub load: LoadOp,
}

/// A closed pass as seen by the graph
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPass {
    pub layout: String,
    pub name: String,
    pub viewport: Option<Viewport>,
    /// `(resource, program input slot)`
    pub inputs: Vec<(String, String)>,
    pub outputs: Vec<RasterView>,
    pub program: Option<String>,
    pub subpass: Option<u32>,
}

impl RecordedPass {
    fn new(layout: &str, name: &str, viewport: Option<Viewport>) -> Self {
        Self {
            layout: layout.to_string(),
            name: name.to_string(),
            viewport,
            inputs: Vec::new(),
            outputs: Vec::new(),
            program: None,
            subpass: None,
        }
    }

    /// Resource names read by this pass
    pub fn reads(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|(res, _)| res.as_str())
    }

    /// Resource names written by this pass
    pub fn writes(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|view| view.resource.as_str())
    }
}

/// First and last position in the execution order touching a resource
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResourceLifetime {
    pub first_use: usize,
    pub last_use: usize,
}

/// Frame graph recorder
#[derive(Default)]
pub struct FrameGraph {
    passes: Vec<RecordedPass>,
    open: Option<RecordedPass>,
    pending_viewport: Option<Viewport>,
    formats: HashMap<String, Format>,
    execution_order: Vec<usize>,
    lifetimes: HashMap<String, ResourceLifetime>,
}

impl FrameGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed passes in record order
    pub fn passes(&self) -> &[RecordedPass] {
        &self.passes
    }

    /// Indices into [`passes`](Self::passes), valid after [`build`](Self::build)
    pub fn execution_order(&self) -> &[usize] {
        &self.execution_order
    }

    pub fn resource_lifetime(&self, resource: &str) -> Option<ResourceLifetime> {
        self.lifetimes.get(resource).copied()
    }

    /// Drop everything recorded for the previous frame
    pub fn clear(&mut self) {
        self.passes.clear();
        self.open = None;
        self.pending_viewport = None;
        self.formats.clear();
        self.execution_order.clear();
        self.lifetimes.clear();
    }

    /// Resolve dependencies and determine execution order
    pub fn build(&mut self) -> Result<()> {
        if let Some(open) = &self.open {
            return Err(Error::Graph(format!("Pass '{}' was never closed", open.name)));
        }

        log::info!("Building frame graph with {} passes", self.passes.len());

        let count = self.passes.len();
        let mut in_degree = vec![0usize; count];
        let mut adj_list: Vec<Vec<usize>> = vec![Vec::new(); count];
        let mut add_edge = |from: usize, to: usize, in_degree: &mut Vec<usize>| {
            if from != to && !adj_list[from].contains(&to) {
                adj_list[from].push(to);
                in_degree[to] += 1;
            }
        };

        let mut last_writer: HashMap<&str, usize> = HashMap::new();
        let mut readers: HashMap<&str, Vec<usize>> = HashMap::new();

        for (i, pass) in self.passes.iter().enumerate() {
            for res in pass.reads() {
                if let Some(&writer) = last_writer.get(res) {
                    add_edge(writer, i, &mut in_degree);
                }
                readers.entry(res).or_default().push(i);
            }
            for res in pass.writes() {
                if let Some(&writer) = last_writer.get(res) {
                    add_edge(writer, i, &mut in_degree);
                }
                if let Some(prior) = readers.get_mut(res) {
                    for reader in prior.drain(..) {
                        add_edge(reader, i, &mut in_degree);
                    }
                }
                last_writer.insert(res, i);
            }
        }

        // Kahn's algorithm, FIFO to preserve record order between independent passes
        let mut queue: VecDeque<usize> = (0..count).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &neighbor in &adj_list[node] {
                in_degree[neighbor] -= 1;
                if in_degree[neighbor] == 0 {
                    queue.push_back(neighbor);
                }
            }
        }

        if order.len() != count {
            return Err(Error::Graph(
                "Cyclic dependency detected in frame graph".to_string(),
            ));
        }

        self.execution_order = order;

        for (i, &pass_idx) in self.execution_order.iter().enumerate() {
            let pass = &self.passes[pass_idx];
            log::debug!("  Pass {}: {} ({})", i, pass.name, pass.layout);
        }

        self.compute_resource_lifetimes();
        Ok(())
    }

    fn compute_resource_lifetimes(&mut self) {
        let mut usage: HashMap<String, ResourceLifetime> = HashMap::new();

        for (exec_idx, &pass_idx) in self.execution_order.iter().enumerate() {
            let pass = &self.passes[pass_idx];
            for res in pass.reads().chain(pass.writes()) {
                usage
                    .entry(res.to_string())
                    .and_modify(|l| {
                        l.first_use = l.first_use.min(exec_idx);
                        l.last_use = l.last_use.max(exec_idx);
                    })
                    .or_insert(ResourceLifetime { first_use: exec_idx, last_use: exec_idx });
            }
        }

        self.lifetimes = usage;
    }

    fn open_pass(&mut self, call: &str) -> Result<&mut RecordedPass> {
        self.open
            .as_mut()
            .ok_or_else(|| Error::Graph(format!("{} called with no open pass", call)))
    }
}

impl PassBuilder for FrameGraph {
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(Error::Resource(format!(
                "Degenerate viewport {}x{}",
                viewport.width, viewport.height
            )));
        }
        self.pending_viewport = Some(viewport);
        Ok(())
    }

    fn begin_pass(&mut self, layout: &str, name: &str) -> Result<()> {
        if let Some(open) = &self.open {
            return Err(Error::Graph(format!(
                "Cannot begin '{}' while '{}' is still open",
                name, open.name
            )));
        }
        log::trace!("begin pass {} ({})", name, layout);
        self.open = Some(RecordedPass::new(layout, name, self.pending_viewport.take()));
        Ok(())
    }

    fn set_input(&mut self, resource: &str, slot: &str) -> Result<()> {
        let pass = self.open_pass("set_input")?;
        if pass.writes().any(|w| w == resource) {
            return Err(Error::Resource(format!(
                "Pass '{}' reads and writes '{}'",
                pass.name, resource
            )));
        }
        pass.inputs.push((resource.to_string(), slot.to_string()));
        Ok(())
    }

    fn add_output(&mut self, resource: &str, format: Format, load: LoadOp) -> Result<()> {
        if let Some(&existing) = self.formats.get(resource) {
            if existing != format {
                return Err(Error::Resource(format!(
                    "'{}' redeclared as {:?}, previously {:?}",
                    resource, format, existing
                )));
            }
        }

        let pass = self.open_pass("add_output")?;
        if pass.reads().any(|r| r == resource) {
            return Err(Error::Resource(format!(
                "Pass '{}' reads and writes '{}'",
                pass.name, resource
            )));
        }
        pass.outputs.push(RasterView {
            resource: resource.to_string(),
            format,
            load,
        });
        self.formats.insert(resource.to_string(), format);
        Ok(())
    }

    fn blit(&mut self, program: &dyn ShadingProgram, subpass: u32) -> Result<()> {
        let pass = self.open_pass("blit")?;
        if subpass >= program.pass_count() {
            return Err(Error::Shader(format!(
                "'{}' has {} subpasses, pass '{}' asked for #{}",
                program.program_name(),
                program.pass_count(),
                pass.name,
                subpass
            )));
        }
        if pass.program.is_some() {
            return Err(Error::Graph(format!("Pass '{}' already has a draw", pass.name)));
        }
        pass.program = Some(program.program_name().to_string());
        pass.subpass = Some(subpass);
        Ok(())
    }

    fn end_pass(&mut self) -> Result<()> {
        let pass = self
            .open
            .take()
            .ok_or_else(|| Error::Graph("end_pass called with no open pass".to_string()))?;
        if pass.outputs.is_empty() {
            return Err(Error::Graph(format!("Pass '{}' declares no outputs", pass.name)));
        }
        log::trace!("end pass {}", pass.name);
        self.passes.push(pass);
        Ok(())
    }
}
