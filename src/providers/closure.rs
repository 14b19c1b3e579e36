use super::EpiParameters;

/// Parameters backed by two closures.
pub struct FnParameters<F, G> {
    r0: F,
    infectivity: G,
}

impl<F, G> FnParameters<F, G>
where
    F: FnMut() -> f64,
    G: FnMut() -> f64,
{
    pub fn new(r0: F, infectivity: G) -> Self {
        Self { r0, infectivity }
    }
}

impl<F, G> EpiParameters for FnParameters<F, G>
where
    F: FnMut() -> f64,
    G: FnMut() -> f64,
{
    fn r0(&mut self) -> f64 {
        (self.r0)()
    }

    fn infectivity(&mut self) -> f64 {
        (self.infectivity)()
    }
}
