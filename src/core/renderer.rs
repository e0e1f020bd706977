/// Generic game renderer trait: pure drawing, no game logic
pub trait GameRenderer<G> {
    /// Draw the whole screen for `game` into the frame
    fn render(frame: &mut ratatui::Frame, game: &G);
}
