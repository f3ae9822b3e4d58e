use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// An embedded master list of uppercase target words.
#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    pub fn new(file_name: String) -> Self {
        read_word_list_from_file(format!("{file_name}.json")).unwrap()
    }

    /// Draw `count` distinct words at random, without replacement. If a
    /// distinct draw cannot be filled and the list is long enough, fall
    /// back to the leading entries of the master list.
    pub fn draw(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        let picked: Vec<String> = self
            .words
            .choose_multiple(&mut rng, count)
            .cloned()
            .collect();

        if picked.len() < count && self.words.len() >= count {
            return self.words[..count].to_vec();
        }
        picked
    }
}

fn read_word_list_from_file(file_name: String) -> Result<WordList, Box<dyn Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .expect("Word list file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let list = from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(list)
}
