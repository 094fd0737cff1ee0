use types::Game;

/// A source the schedule can be pulled from. There is exactly one real
/// implementation; the seam keeps the pipeline testable without a network.
pub trait ScheduleSource: Send + Sync + 'static {
    const NAME: &'static str;

    fn fetch_schedule(
        &mut self,
    ) -> impl std::future::Future<Output = eyre::Result<Vec<Game>>> + Send;
}

pub mod huskers;
pub mod types;
