// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::numeric::scalar::Scalar;
use crate::operations::triangulation::{self, InputData, InputView, OutputData, Workspace};
use crate::settings::TriangulationSettings;
use crate::status::Status;

/// Owns an input, its settings and the output of the last run.
#[derive(Clone, Debug)]
pub struct Triangulator<T: Scalar> {
    pub input: InputData<T>,
    pub settings: TriangulationSettings,
    output: OutputData<T>,
    workspace: Workspace<T>,
}

impl<T: Scalar> Default for Triangulator<T> {
    fn default() -> Self {
        Self::new(InputData::default(), TriangulationSettings::default())
    }
}

impl<T: Scalar> Triangulator<T> {
    pub fn new(input: InputData<T>, settings: TriangulationSettings) -> Self {
        Self {
            input,
            settings,
            output: OutputData::default(),
            workspace: Workspace::default(),
        }
    }

    /// Runs the pipeline on the calling thread, replacing the previous output.
    pub fn run(&mut self) -> Status {
        triangulation::triangulate(
            self.input.view(),
            &self.settings,
            &mut self.workspace,
            &mut self.output,
        );
        self.output.status
    }

    /// Runs on the rayon pool once every dependency has completed. The
    /// triangulator comes back from [`Handle::complete`].
    pub fn schedule(mut self, dependencies: &[Dependency]) -> Handle<Self> {
        Handle::spawn(dependencies, move || {
            self.run();
            self
        })
    }

    #[inline]
    pub fn output(&self) -> &OutputData<T> {
        &self.output
    }

    pub fn into_output(self) -> OutputData<T> {
        self.output
    }
}

/// Validates `input` against `settings` without triangulating.
pub fn validate<T: Scalar>(input: &InputData<T>, settings: &TriangulationSettings) -> Status {
    triangulation::validate::validate(&input.view(), settings)
}

/// Triangulates `input` on the calling thread.
pub fn run<T: Scalar>(input: &InputData<T>, settings: &TriangulationSettings) -> OutputData<T> {
    let mut output = OutputData::default();
    triangulation::triangulate(
        input.view(),
        settings,
        &mut Workspace::default(),
        &mut output,
    );
    output
}

/// Triangulates `input` on the rayon pool after `dependencies` complete.
pub fn schedule<T: Scalar>(
    input: InputData<T>,
    settings: TriangulationSettings,
    dependencies: &[Dependency],
) -> Handle<OutputData<T>> {
    Handle::spawn(dependencies, move || run(&input, &settings))
}

type Continuation = Box<dyn FnOnce() + Send>;

#[inline]
fn lock<V>(m: &Mutex<V>) -> MutexGuard<'_, V> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct CompletionState {
    done: bool,
    continuations: Vec<Continuation>,
}

#[derive(Default)]
struct Completion {
    state: Mutex<CompletionState>,
    signal: Condvar,
}

impl Completion {
    fn finish(&self) {
        let continuations = {
            let mut state = lock(&self.state);
            state.done = true;
            mem::take(&mut state.continuations)
        };
        self.signal.notify_all();
        for c in continuations {
            c();
        }
    }

    /// Calls `c` once finished, right away when already done.
    fn on_finish(&self, c: Continuation) {
        let mut state = lock(&self.state);
        if state.done {
            drop(state);
            c();
        } else {
            state.continuations.push(c);
        }
    }

    fn wait(&self) {
        let mut state = lock(&self.state);
        while !state.done {
            state = self
                .signal
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn is_done(&self) -> bool {
        lock(&self.state).done
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("done", &self.is_done())
            .finish_non_exhaustive()
    }
}

/// Token that later jobs wait on before they start.
#[derive(Clone, Debug)]
pub struct Dependency(Arc<Completion>);

impl Dependency {
    /// Blocks until the job behind this token has finished.
    pub fn wait(&self) {
        self.0.wait();
    }

    pub fn is_complete(&self) -> bool {
        self.0.is_done()
    }
}

/// Calls `start` once every dependency has finished. Nothing blocks: the
/// last dependency to finish makes the call.
fn start_after(dependencies: &[Dependency], start: Continuation) {
    if dependencies.is_empty() {
        start();
        return;
    }
    let pending = Arc::new(AtomicUsize::new(dependencies.len()));
    let start = Arc::new(Mutex::new(Some(start)));
    for d in dependencies {
        let pending = Arc::clone(&pending);
        let start = Arc::clone(&start);
        d.0.on_finish(Box::new(move || {
            if pending.fetch_sub(1, Ordering::AcqRel) == 1 {
                let start = lock(&start).take();
                if let Some(start) = start {
                    start();
                }
            }
        }));
    }
}

struct Slot<O> {
    value: Mutex<Option<thread::Result<O>>>,
    ready: Condvar,
}

/// A scheduled triangulation. Its result may only be read through
/// [`Handle::complete`].
pub struct Handle<O> {
    slot: Arc<Slot<O>>,
    completion: Arc<Completion>,
}

impl<O> fmt::Debug for Handle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("completion", &self.completion)
            .finish_non_exhaustive()
    }
}

impl<O: Send + 'static> Handle<O> {
    fn spawn<F>(dependencies: &[Dependency], job: F) -> Self
    where
        F: FnOnce() -> O + Send + 'static,
    {
        let slot = Arc::new(Slot {
            value: Mutex::new(None),
            ready: Condvar::new(),
        });
        let completion = Arc::new(Completion::default());

        let start = {
            let slot = Arc::clone(&slot);
            let completion = Arc::clone(&completion);
            move || {
                rayon::spawn(move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(job));
                    *lock(&slot.value) = Some(outcome);
                    slot.ready.notify_all();
                    completion.finish();
                });
            }
        };
        start_after(dependencies, Box::new(start));
        Self { slot, completion }
    }

    /// Token for jobs that must run after this one.
    pub fn dependency(&self) -> Dependency {
        Dependency(Arc::clone(&self.completion))
    }

    pub fn is_finished(&self) -> bool {
        self.completion.is_done()
    }

    /// Blocks until the job is done and returns its result. A panic in the
    /// job is resumed on the caller.
    pub fn complete(self) -> O {
        let mut value = lock(&self.slot.value);
        let outcome = loop {
            if let Some(outcome) = value.take() {
                break outcome;
            }
            value = self
                .slot
                .ready
                .wait(value)
                .unwrap_or_else(PoisonError::into_inner);
        };
        drop(value);
        match outcome {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Pipeline that writes into caller-owned buffers and keeps its scratch
/// allocations between calls.
#[derive(Clone, Debug)]
pub struct TriangulationEngine<T: Scalar> {
    workspace: Workspace<T>,
}

impl<T: Scalar> Default for TriangulationEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> TriangulationEngine<T> {
    pub fn new() -> Self {
        Self {
            workspace: Workspace::default(),
        }
    }

    /// Clears `output` and fills it with the triangulation of `input`.
    pub fn triangulate_into(
        &mut self,
        input: InputView<'_, T>,
        settings: &TriangulationSettings,
        output: &mut OutputData<T>,
    ) -> Status {
        triangulation::triangulate(input, settings, &mut self.workspace, output);
        output.status
    }
}

/// One-shot form of [`TriangulationEngine::triangulate_into`].
pub fn triangulate_into<T: Scalar>(
    input: InputView<'_, T>,
    settings: &TriangulationSettings,
    output: &mut OutputData<T>,
) -> Status {
    TriangulationEngine::new().triangulate_into(input, settings, output)
}
