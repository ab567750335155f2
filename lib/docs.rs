//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Spatial discretization](#spatial-discretization)
//! - [Time integration](#time-integration)
//! - [Step potentials](#step-potentials)
//! - [Units](#units)
//!
//! # Background
//! A quantum particle of mass *m* moving in one dimension under a static
//! potential *V*(*x*) is described by the time-dependent Schrödinger equation
//! (TDSE)
//! ```text
//!   ∂ψ       ħ² ∂²ψ
//! iħ -- = - --- ---- + V(x) ψ(x, t)
//!   ∂t      2 m ∂x²
//! ```
//! whose right-hand side is the Hamiltonian *H* acting on the wavefunction.
//! Since *H* is Hermitian, the evolution it generates is unitary: the total
//! probability ∫ |*ψ*|² *dx* is conserved for all time, as is the energy
//! expectation value ⟨*ψ*|*H*|*ψ*⟩. Both serve as checks on the numerics.
//!
//! This crate follows the method of lines: space is discretized first,
//! turning the PDE into a (large) system of coupled, linear, complex ODEs in
//! time, which is then handed to a general-purpose ODE integrator.
//!
//! # Spatial discretization
//! Assuming a discretization
//! ```text
//! x[i] = x₀ + i δx, i ∊ {0, ..., N - 1}
//! ψ[i](t) = ψ(x[i], t)
//! ```
//! the second derivative is replaced by the three-point centered difference
//! ```text
//! ∂²ψ      ψ[i - 1] - 2 ψ[i] + ψ[i + 1]
//! ---- ≈  ----------------------------
//! ∂x²                 δx²
//! ```
//! which has an *O*(*δx*²) error term. Values beyond either end of the grid are
//! taken to be zero, which is equivalent to placing infinitely high walls just
//! outside the domain: probability reaching an edge is reflected rather than
//! absorbed, so simulations should be sized such that the packet stays away
//! from the edges for the times of interest.
//!
//! In matrix form, the Laplacian is
//! ```text
//! L = (I{-1} - 2 I{0} + I{+1}) / δx²
//! ```
//! where *I*{*k*} is the *N*×*N* matrix with elements equal to 1 on the *k*-th
//! diagonal and 0 elsewhere. *L* is real, symmetric, and negative definite,
//! with eigenvalues
//! ```text
//!          4       π k
//! λ[k] = - --- sin²(-------) , k ∊ {1, ..., N}
//!          δx²    2 (N + 1)
//! ```
//! and discrete sine modes for eigenvectors. Only the three diagonals are ever
//! stored, so applying *L* costs *O*(*N*).
//!
//! # Time integration
//! After discretization, the TDSE reads
//! ```text
//! dψ        ħ            V
//! -- = -i (- -- L ψ + --- ψ)
//! dt       2 m          ħ
//! ```
//! This system is integrated with the embedded Bogacki-Shampine 3(2)
//! Runge-Kutta pair, a four-stage scheme whose last stage is evaluated at the
//! new state and is reused as the first stage of the next step ("first same as
//! last"), so that each accepted step costs three evaluations of the
//! right-hand side. The difference between the third- and second-order
//! solutions gives an estimate of the local error,
//! ```text
//!         ‖ err[i] / (atol + rtol max(|ψ[i]|, |ψ'[i]|)) ‖
//! ```
//! measured with a root-mean-square norm over grid points; a step is accepted
//! when this quantity is below 1, and in either case the next step size is
//! scaled by 0.9 (error)^(-1/3), clamped to the range \[0.2, 10\]. Steps are
//! shortened as needed to land exactly on every requested output time.
//!
//! The eigenvalues of the discretized Hamiltonian are purely imaginary in this
//! formulation, and lie on the imaginary axis out to ~*ħ*/(*m* *δx*²). The
//! stability region of the third-order scheme covers a segment of the
//! imaginary axis, but only marginally: modes outside of it grow, and modes
//! inside of it decay slightly. In practice the error controller holds the
//! step size well inside the stable segment, and the residual damping shows
//! up as a slow loss of total probability that shrinks with the tolerances.
//!
//! # Step potentials
//! Step potentials are specified by an ordered list of wall positions
//! *w*\[0\] < *w*\[1\] < ... and a single height *V*₀:
//! ```text
//!        ⎧ V₀  if w[2j] ≤ x ≤ w[2j + 1] for some j
//! V(x) = ⎨ V₀  if x ≥ w[M - 1] and the number of walls M is odd
//!        ⎩ 0   otherwise
//! ```
//! A packet with mean energy *E* = *ħ*²*k*²/2*m* incident on a single barrier
//! of width *a* is mostly reflected when *E* ≪ *V*₀ and *κ* *a* ≫ 1, where
//! *κ* = √(2*m*(*V*₀ - *E*))/*ħ*, and mostly transmitted when *E* ≫ *V*₀.
//!
//! # Units
//! All functions in this crate work in whatever units *ħ* and *m* are given in
//! (see [`Constants`][crate::evolve::Constants]); by default both are 1. In
//! these natural units, lengths are measured against some characteristic
//! length *a*, energies against *ħ*²/*m* *a*², and times against *m* *a*²/*ħ*.
//! A packet of wavenumber *k* then moves with group velocity *k* and its
//! probability density disperses as
//! ```text
//! σ(t)² = σ₀² + t² / (4 σ₀²)
//! ```
//! for a freely moving Gaussian of initial (density) standard deviation *σ*₀.
