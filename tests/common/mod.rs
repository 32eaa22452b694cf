//! Shared helpers for the post-process integration tests.
//!
//! `RecordingStage` stands in for a GPU post-process: it records every
//! call the effects make so tests can assert on the bookkeeping.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vesper::prelude::*;

#[derive(Debug, Default)]
pub struct StageLog {
    pub instances: usize,
    pub attached: Vec<String>,
    pub detached: Vec<String>,
    pub disposed: Vec<Option<String>>,
    pub updates: usize,
}

pub type SharedLog = Rc<RefCell<StageLog>>;

pub struct RecordingStage {
    name: String,
    supported: bool,
    samples: u32,
    log: SharedLog,
}

impl PostProcess for RecordingStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn samples(&self) -> u32 {
        self.samples
    }

    fn set_samples(&mut self, samples: u32) {
        self.samples = samples;
    }

    fn update(&mut self) {
        self.log.borrow_mut().updates += 1;
    }

    fn attach_to_camera(&mut self, camera: &Camera) {
        self.log.borrow_mut().attached.push(camera.name().to_owned());
    }

    fn detach_from_camera(&mut self, camera: &Camera) {
        self.log.borrow_mut().detached.push(camera.name().to_owned());
    }

    fn dispose(&mut self, camera: Option<&Camera>) {
        self.log
            .borrow_mut()
            .disposed
            .push(camera.map(|c| c.name().to_owned()));
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn camera(name: &'static str) -> CameraHandle {
    Camera::new(name).into_handle()
}

pub fn backend(version: u32) -> Rc<dyn RenderBackend> {
    Rc::new(BackendInfo {
        version,
        ..Default::default()
    })
}

/// Effect whose instances each hold `stages` recording stages.
pub fn effect_with(name: &str, stages: &[&'static str], supported: bool, single_instance: bool) -> (PostProcessRenderEffect, SharedLog) {
    let log = SharedLog::default();
    let factory_log = log.clone();
    let stages: Vec<&'static str> = stages.to_vec();
    let effect = PostProcessRenderEffect::new(
        name,
        move || {
            factory_log.borrow_mut().instances += 1;
            stages
                .iter()
                .map(|stage| {
                    Box::new(RecordingStage {
                        name: (*stage).to_owned(),
                        supported,
                        samples: 1,
                        log: factory_log.clone(),
                    }) as Box<dyn PostProcess>
                })
                .collect()
        },
        single_instance,
    );
    (effect, log)
}

/// Single-instance, supported effect with one stage named after the effect.
pub fn effect(name: &'static str) -> (PostProcessRenderEffect, SharedLog) {
    effect_with(name, &[name], true, true)
}

pub fn empty_chain() -> PostProcessChain {
    PostProcessChain::new()
}

pub fn names(cameras: &[CameraHandle]) -> Vec<String> {
    cameras.iter().map(|c| c.name().to_owned()).collect()
}
