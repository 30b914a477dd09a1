//! Media blocks (`!=[...]`, `!<[...]`, `!>[...]`), horizontal rules, and
//! clear-float markers.

use super::scan::{at, count_streak, end_of_line, search_closer};
use super::BlockParser;
use crate::inline_parser::data_marks::{MEDIA_DATA_MARK, parse_data_mark};
use crate::parts::{Float, MediaData, Part};

impl BlockParser<'_> {
    /// `!=[alt](href)` with optional `[caption][title]` groups and an
    /// optional second `(...)` group selecting image/audio/video. Anything
    /// malformed degrades to a paragraph.
    pub(crate) fn parse_media(&mut self, float: Option<Float>) {
        let start = self.cur.i;

        let Some(end) = search_closer(self.src, self.cur.i + 3, '[', ']', false, self.src.len())
        else {
            return self.parse_paragraph_at(start);
        };

        let alt_text: String = self.src[self.cur.i + 3..end].iter().collect();

        self.cur.i = end;
        self.cur.chunk_start = end + 1;
        let Some(data) =
            parse_data_mark(self.src, &mut self.cur, MEDIA_DATA_MARK, self.src.len(), true)
        else {
            return self.parse_paragraph_at(start);
        };

        let Some(href) = data.href_at(0).map(str::to_string) else {
            return self.parse_paragraph_at(start);
        };

        let media = MediaData {
            href,
            alt_text,
            float,
            caption: data.text_at(0).map(str::to_string),
            title: data.text_at(1).map(str::to_string),
        };

        let part = match data.href_at(1) {
            None | Some("image") => Part::ImageBlock { media },
            Some("audio") => Part::AudioBlock { media },
            Some("video") => Part::VideoBlock { media },
            Some(_) => return self.parse_paragraph_at(start),
        };

        self.parts().push(part);
        self.cur.i += 1;
    }

    /// `---` with an optional trailing `<--->` clear-float marker.
    pub(crate) fn parse_horizontal_rule(&mut self) {
        let streak = count_streak(self.src, self.cur.i, '-');
        let after = self.cur.i + streak;

        let clear_float = at(self.src, after) == Some('<')
            && at(self.src, after + 1) == Some('-')
            && at(self.src, after + 2) == Some('-')
            && at(self.src, after + 3) == Some('-')
            && at(self.src, after + 4) == Some('>');

        self.parts().push(Part::HorizontalRule { clear_float });
        self.cur.i = end_of_line(self.src, self.cur.i) + 1;
    }

    /// `<--->` alone on a line.
    pub(crate) fn parse_clear_float(&mut self) {
        let streak = count_streak(self.src, self.cur.i + 1, '-');

        if at(self.src, self.cur.i + 1 + streak) == Some('>') {
            self.parts().push(Part::ClearFloat);
            self.cur.i = end_of_line(self.src, self.cur.i) + 1;
        } else {
            self.parse_paragraph();
        }
    }
}
