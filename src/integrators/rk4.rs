use std::marker::PhantomData;

use crate::physics::dynamics::EquationsOfMotion;

/// Classical fixed-step 4th-order Runge-Kutta. Generic over any state that
/// forms a vector space under `Add` and `Mul<f64>`; no error estimation, no
/// adaptivity. Integrating an orientation leaves it slightly off the unit
/// sphere, so the caller renormalizes after each step.
pub struct RK4<T: EquationsOfMotion> {
    eom: T,
}

impl<T: EquationsOfMotion> RK4<T>
where
    T::State: Clone + std::ops::Add<Output = T::State> + std::ops::Mul<f64, Output = T::State>,
{
    pub fn new(eom: T) -> Self {
        RK4 { eom }
    }

    pub fn integrate(&mut self, state: &T::State, time: f64, dt: f64) -> T::State {
        let k1 = self.eom.compute_derivative(state, time);

        let state2 = state.clone() + k1.clone() * (dt / 2.0);
        let k2 = self.eom.compute_derivative(&state2, time + dt / 2.0);

        let state3 = state.clone() + k2.clone() * (dt / 2.0);
        let k3 = self.eom.compute_derivative(&state3, time + dt / 2.0);

        let state4 = state.clone() + k3.clone() * dt;
        let k4 = self.eom.compute_derivative(&state4, time + dt);

        state.clone() + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
    }

    pub fn into_inner(self) -> T {
        self.eom
    }
}

/// Adapter lifting any `FnMut(&S, t) -> S` into `EquationsOfMotion`, so the
/// integrator drives plain closures (and plain `f64` states) as readily as
/// spacecraft dynamics.
pub struct OdeFunction<S, F: FnMut(&S, f64) -> S> {
    func: F,
    marker: PhantomData<fn(&S) -> S>,
}

impl<S, F: FnMut(&S, f64) -> S> OdeFunction<S, F> {
    pub fn new(func: F) -> Self {
        OdeFunction {
            func,
            marker: PhantomData,
        }
    }
}

impl<S, F: FnMut(&S, f64) -> S> EquationsOfMotion for OdeFunction<S, F> {
    type State = S;

    fn compute_derivative(&mut self, state: &S, time: f64) -> S {
        (self.func)(state, time)
    }
}
