use gridworld::*;

#[allow(dead_code)]
pub fn s(row: Discrete, col: Discrete) -> State {
    State::new(row, col)
}

#[allow(dead_code)]
pub fn grid(size: Discrete, obstacles: &[(Discrete, Discrete)]) -> GridWorld {
    GridWorld::with_corner_goal(size, obstacles.iter().copied().map(State::from)).unwrap()
}

#[allow(dead_code)]
pub fn configuration_error<T: std::fmt::Debug>(r: Result<T>) -> String {
    match r {
        Err(Error::Configuration(msg)) => msg,
        other => panic!("{other:?} is not Error::Configuration."),
    }
}
