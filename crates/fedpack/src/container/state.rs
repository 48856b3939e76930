/// Lifecycle of the remote container.
///
/// The first build always produces a container, even an empty one, because the
/// rewritten entries load it unconditionally. After that, builds only happen when
/// new dependencies were collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainerState {
  #[default]
  AwaitingFirstBuild,
  SteadyState,
}

impl ContainerState {
  pub fn is_awaiting_first_build(self) -> bool {
    matches!(self, Self::AwaitingFirstBuild)
  }

  /// The state after a successful build. There is no way back.
  #[must_use]
  pub fn after_build(self) -> Self {
    Self::SteadyState
  }
}

#[test]
fn test_transitions_only_forward() {
  let state = ContainerState::default();
  assert!(state.is_awaiting_first_build());
  let state = state.after_build();
  assert_eq!(state, ContainerState::SteadyState);
  assert_eq!(state.after_build(), ContainerState::SteadyState);
}
