use crate::graph::{
    amplify::Amplify,
    modulate::Modulate,
    node::{GraphNode, Modulatable},
    through::Through,
};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M: GraphNode>(self, modulator: M) -> Amplify<Self, M> {
        Amplify::new(self, modulator)
    }

    fn through<F: GraphNode>(self, effect: F) -> Through<Self, F> {
        Through::new(self, effect)
    }

    fn modulate<C: GraphNode>(self, control: C, param: Self::Param, depth: f32) -> Modulate<Self, C>
    where
        Self: Modulatable,
    {
        Modulate::new(self, control, param, depth)
    }
}

impl<T: GraphNode> NodeExt for T {}
