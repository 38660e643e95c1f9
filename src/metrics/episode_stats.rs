//! Episode statistics for rollouts
//!
//! Tracks episode returns, lengths and engine scores over a rolling window,
//! plus lifetime totals and the best score seen.

use std::collections::VecDeque;

/// Episode statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use snake_gym::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(3.0, 150, 4);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode returns (rolling window)
    episode_returns: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Engine scores at episode end (rolling window)
    episode_scores: VecDeque<u32>,

    total_episodes: usize,
    total_steps: usize,
    high_score: u32,
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes for averages
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_returns: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            high_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `episode_return` - Sum of step rewards
    /// * `length` - Number of steps taken
    /// * `score` - Engine score when the episode ended
    pub fn record_episode(&mut self, episode_return: f32, length: usize, score: u32) {
        Self::push_deque(&mut self.episode_returns, episode_return, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.high_score = self.high_score.max(score);
    }

    pub fn mean_return(&self) -> f32 {
        if self.episode_returns.is_empty() {
            0.0
        } else {
            self.episode_returns.iter().sum::<f32>() / self.episode_returns.len() as f32
        }
    }

    /// Mean return divided by the environment's reward bound
    pub fn normalized_return(&self, max_reward: f32) -> f32 {
        if max_reward == 0.0 {
            0.0
        } else {
            self.mean_return() / max_reward
        }
    }

    pub fn mean_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    pub fn mean_score(&self) -> f32 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_scores.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Return: {:.2} | Score: {:.2} | Len: {:.1} | Best: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_return(),
            self.mean_score(),
            self.mean_length(),
            self.high_score,
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
