pub mod quaternion;

use nalgebra as na;

pub type Vector3 = na::Vector3<f64>;
pub type Matrix3 = na::Matrix3<f64>;
