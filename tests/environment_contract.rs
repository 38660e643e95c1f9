mod common;

use common::{FEATURES, ScriptedEngine};
use snake_gym::remote::RemoteEngine;
use snake_gym::render::{MemorySurface, Rgb};
use snake_gym::rl::{
    Direction, EnvConfig, GlobalStrategy, LocalStrategy, Observation, RelativeTurn, SnakeEnv,
    StateSize,
};

fn local_env(engine: ScriptedEngine) -> SnakeEnv<ScriptedEngine, LocalStrategy> {
    SnakeEnv::new(engine, LocalStrategy::default(), &EnvConfig::default()).unwrap()
}

fn global_env(engine: ScriptedEngine) -> SnakeEnv<ScriptedEngine, GlobalStrategy> {
    SnakeEnv::new(engine, GlobalStrategy::default(), &EnvConfig::default()).unwrap()
}

#[test]
fn test_construction_unpauses_and_registers_once() {
    let mut env = local_env(ScriptedEngine::new(10, 10));

    assert!(!env.engine_mut().paused);
    assert_eq!(env.snake_index(), 0);
    assert_eq!(env.engine_mut().count("add_snake"), 1);

    env.reset().unwrap();
    env.reset().unwrap();
    env.seed(3).unwrap();
    assert_eq!(env.engine_mut().count("add_snake"), 1);
    assert_eq!(env.snake_index(), 0);
}

#[test]
fn test_construction_fails_without_snake_handle() {
    let mut engine = ScriptedEngine::new(10, 10);
    engine.hide_snakes = true;

    let err = SnakeEnv::new(engine, LocalStrategy::default(), &EnvConfig::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("no snake at index 0"));
}

#[test]
fn test_step_before_reset() {
    let mut env = local_env(ScriptedEngine::new(10, 10));

    let (observation, reward, done) = env.step(1).unwrap();

    assert_eq!(observation.len(), FEATURES);
    assert_eq!(reward, 0.0);
    assert!(!done);
    // Construction left the board running, so the tick happened
    assert_eq!(env.engine_mut().ticks, 1);
}

#[test]
fn test_reset_requeries_unpaused_state() {
    let mut env = local_env(ScriptedEngine::new(10, 10));
    env.step(1).unwrap();

    env.reset().unwrap();

    let engine = env.engine_mut();
    assert!(!engine.is_paused().unwrap());
    assert_eq!(engine.ticks, 0);
    assert_eq!(engine.count("reset"), 1);
}

#[test]
fn test_reset_twice_matches_state_size_local() {
    let mut env = local_env(ScriptedEngine::new(10, 10));

    for _ in 0..2 {
        let observation = env.reset().unwrap();
        assert_eq!(observation.state_size(), env.state_size().unwrap());
    }
    assert_eq!(env.state_size().unwrap(), StateSize::Flat(FEATURES));
}

#[test]
fn test_reset_twice_matches_state_size_global() {
    let mut env = global_env(ScriptedEngine::new(12, 7));

    for _ in 0..2 {
        let observation = env.reset().unwrap();
        assert_eq!(observation.state_size(), env.state_size().unwrap());
    }
    assert_eq!(
        env.state_size().unwrap(),
        StateSize::Grid {
            width: 12,
            height: 7,
            channels: 3
        }
    );
}

#[test]
fn test_global_bitmap_marks_board() {
    let mut env = global_env(ScriptedEngine::new(10, 10));

    let bitmap = env.reset().unwrap();
    let head = env.engine_mut().head;

    assert_eq!(bitmap.width(), 10);
    assert_eq!(bitmap.height(), 10);
    assert_eq!(bitmap.get(head.x as usize, head.y as usize, 0), Some(1.0));
}

#[test]
fn test_reward_law() {
    let engine = ScriptedEngine::new(10, 10).with_outcomes(&[
        (false, true),
        (false, false),
        (true, true),
    ]);
    let mut env = local_env(engine);
    env.reset().unwrap();

    let (_, reward, done) = env.step(1).unwrap();
    assert_eq!((reward, done), (1.0, false));

    let (_, reward, done) = env.step(1).unwrap();
    assert_eq!((reward, done), (0.0, false));

    let eating_checks = env.engine_mut().count("is_eating");
    let (_, reward, done) = env.step(1).unwrap();
    assert_eq!((reward, done), (-1.0, true));
    // Death short-circuits the eating query
    assert_eq!(env.engine_mut().count("is_eating"), eating_checks);
}

#[test]
fn test_reward_and_done_never_disagree() {
    let outcomes: Vec<(bool, bool)> = (0..40).map(|i| (i % 7 == 6, i % 3 == 0)).collect();
    let mut env = local_env(ScriptedEngine::new(10, 10).with_outcomes(&outcomes));

    // Five scripted deaths: i = 6, 13, 20, 27, 34
    for _ in 0..5 {
        env.reset().unwrap();
        loop {
            let (_, reward, done) = env.step(1).unwrap();
            assert_eq!(reward == -1.0, done);
            assert!(reward == -1.0 || reward == 0.0 || reward == 1.0);
            if done {
                break;
            }
        }
    }
}

#[test]
fn test_seed_replays_episode() {
    let actions = [0, 1, 2, 2, 1, 0, 1];
    let outcomes = [(false, false), (false, true), (false, false), (true, false)];

    let mut env = local_env(ScriptedEngine::new(10, 10));
    let run = |env: &mut SnakeEnv<ScriptedEngine, LocalStrategy>, seed: u64| {
        env.engine_mut().outcomes = outcomes.iter().copied().collect();
        let first = env.seed(seed).unwrap();
        let transitions: Vec<_> = actions.iter().map(|&a| env.step(a).unwrap()).collect();
        (first, transitions)
    };

    let first = run(&mut env, 7);
    let second = run(&mut env, 7);
    let other = run(&mut env, 8);

    assert_eq!(first, second);
    assert_ne!(first.0, other.0);
}

#[test]
fn test_local_forwards_relative_turns() {
    let mut env = local_env(ScriptedEngine::new(10, 10));
    let right = env.strategy().code(RelativeTurn::Right);

    env.step(right).unwrap();
    env.step(-5).unwrap();

    let engine = env.engine_mut();
    assert_eq!(engine.relative_turns, vec![2, -5]);
    assert!(engine.absolute_turns.is_empty());
}

#[test]
fn test_global_forwards_absolute_turns() {
    let mut env = global_env(ScriptedEngine::new(10, 10));
    let down = env.strategy().code(Direction::Down);

    env.step(down).unwrap();

    let engine = env.engine_mut();
    assert_eq!(engine.absolute_turns, vec![2]);
    assert!(engine.relative_turns.is_empty());
}

#[test]
fn test_last_observation_is_cached() {
    let mut env = local_env(ScriptedEngine::new(10, 10));
    assert!(env.last_observation().is_none());

    let (observation, _, _) = env.step(1).unwrap();
    assert_eq!(env.last_observation(), Some(&observation));
}

#[test]
fn test_render_without_visualize_is_noop() {
    let observer = MemorySurface::new();
    let mut env = local_env(ScriptedEngine::new(10, 10)).with_surface(Box::new(observer.clone()));
    let calls_before = env.engine_mut().calls.len();

    env.render().unwrap();

    assert_eq!(observer.frame_count(), 0);
    assert_eq!(env.engine_mut().calls.len(), calls_before);
}

#[test]
fn test_render_draws_board() {
    let observer = MemorySurface::new();
    let config = EnvConfig::default().with_visualize(true);
    let mut env = SnakeEnv::new(ScriptedEngine::new(10, 10), LocalStrategy::default(), &config)
        .unwrap()
        .with_surface(Box::new(observer.clone()));
    env.reset().unwrap();

    env.render().unwrap();

    let frame = observer.last_frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (200, 200));

    let engine = env.engine_mut();
    let (head, body) = (engine.head, engine.tail[0]);
    let px = |c: snake_gym::remote::Coordinate| (c.x as usize * 20 + 10, c.y as usize * 20 + 10);

    let (x, y) = px(head);
    assert_eq!(frame.pixel(x, y), Some(Rgb(140, 230, 140)));
    let (x, y) = px(body);
    assert_eq!(frame.pixel(x, y), Some(Rgb(80, 230, 80)));

    env.close().unwrap();
    assert!(observer.is_closed());
}

#[test]
fn test_max_reward() {
    let env = local_env(ScriptedEngine::new(10, 10));
    assert_eq!(env.max_reward(), 150.0);

    let config = EnvConfig {
        max_reward: 40.0,
        ..EnvConfig::default()
    };
    let env = SnakeEnv::new(ScriptedEngine::new(10, 10), LocalStrategy::default(), &config).unwrap();
    assert_eq!(env.max_reward(), 40.0);
}

#[test]
fn test_continue_step_away_from_hazards() {
    let mut env = local_env(ScriptedEngine::new(10, 10));

    let observation = env.reset().unwrap();
    assert_eq!(env.state_size().unwrap(), StateSize::Flat(observation.len()));

    let straight = env.strategy().code(RelativeTurn::Straight);
    let (_, reward, done) = env.step(straight).unwrap();
    assert!(!done);
    assert_eq!(reward, 0.0);
}
