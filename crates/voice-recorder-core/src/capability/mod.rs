//! Collaborators the session drives but does not implement.

mod level_probe;
mod level_sampler;
mod recorder;
mod status_presenter;

pub use {
    level_probe::LevelProbe, level_sampler::LevelSampler, recorder::Recorder,
    status_presenter::StatusPresenter,
};
